use std::sync::atomic::{AtomicU8, Ordering};

const QUIET: u8 = 0;
const NORMAL: u8 = 1;
const VERBOSE: u8 = 2;

/// Process-wide output level. Quiet wins over verbose when both are given.
static OUTPUT_LEVEL: AtomicU8 = AtomicU8::new(NORMAL);

pub fn set_output_level(quiet: bool, verbose: bool) {
    let level = if quiet {
        QUIET
    } else if verbose {
        VERBOSE
    } else {
        NORMAL
    };
    OUTPUT_LEVEL.store(level, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    OUTPUT_LEVEL.load(Ordering::Relaxed) == QUIET
}

pub fn is_verbose() -> bool {
    OUTPUT_LEVEL.load(Ordering::Relaxed) == VERBOSE
}

/// Progress and summary lines; suppressed by `--quiet`.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            println!($($arg)*);
        }
    };
}

/// Per-file skip/unchanged diagnostics; shown only under `--verbose`.
#[macro_export]
macro_rules! detail {
    ($($arg:tt)*) => {
        if $crate::logger::is_verbose() {
            println!("⏭️  {}", format!($($arg)*));
        }
    };
}

/// Per-file failures and walk errors; always emitted, on stderr.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        eprintln!("❌ {}", format!($($arg)*))
    };
}

/// Cautions (in-place overwrite notice, failure tally); suppressed by `--quiet`.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if !$crate::logger::is_quiet() {
            eprintln!("⚠️  {}", format!($($arg)*));
        }
    };
}
