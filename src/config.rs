use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::constants::{MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};
use crate::error::{CompactError, Result};

/// Run configuration, built once at startup and threaded through every
/// component call.
#[derive(Debug, Clone)]
pub struct CompactorConfig {
    pub root: PathBuf,
    pub jpeg_quality: u8,
    pub min_size_bytes: u64,
    pub recursive: bool,
    pub dry_run: bool,
    /// Paths never eligible for processing, canonicalized where possible.
    pub protected: Vec<PathBuf>,
}

impl CompactorConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&args.quality) {
            return Err(CompactError::InvalidQuality(args.quality));
        }

        if !args.target.exists() {
            return Err(CompactError::RootNotFound(args.target.clone()));
        }
        if !args.target.is_dir() {
            return Err(CompactError::NotADirectory(args.target.clone()));
        }

        // Canonicalize up front so protected-path comparison is by identity,
        // not by spelling. Paths that do not exist yet stay as given.
        let protected = args
            .exclude
            .iter()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
            .collect();

        Ok(Self {
            root: args.target.clone(),
            jpeg_quality: args.quality,
            min_size_bytes: args.min_size_kb.saturating_mul(1024),
            recursive: !args.no_recursive,
            dry_run: args.dry_run,
            protected,
        })
    }

    pub fn is_protected(&self, path: &Path) -> bool {
        let candidate = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.protected.iter().any(|p| *p == candidate)
    }
}
