pub mod classify;
pub mod cli;
pub mod compress;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;
pub mod run;
pub mod utils;
pub mod walk;

pub use classify::{classify, Decision, ImageKind, SkipReason};
pub use compress::{compact_file, prepare_for_jpeg, FileOutcome};
pub use config::CompactorConfig;
pub use error::{CompactError, Result};
pub use run::{run, RunSummary};
pub use utils::{format_size, savings_percent};
pub use walk::candidate_files;
