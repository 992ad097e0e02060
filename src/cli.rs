use clap::Parser;
use std::path::PathBuf;

use crate::constants::{DEFAULT_JPEG_QUALITY, DEFAULT_MIN_SIZE_KIB};

#[derive(Parser, Debug)]
#[command(
    name = "img-compact",
    about = "Recompress JPEG/PNG files in place, keeping only results that shrink",
    long_about = "img-compact walks a directory tree, finds JPEG and PNG files above a size \
                  threshold, and recompresses each one in place. The original file is replaced \
                  only when the recompressed version is strictly smaller; otherwise it is left \
                  byte-for-byte untouched. JPEG recompression is lossy, PNG re-optimization is \
                  lossless.",
    version,
    after_help = "EXAMPLES:\n  \
    img-compact ./photos -q 75\n  \
    img-compact ./assets --min-size-kb 100 --dry-run\n  \
    img-compact . -x ./photos/originals --verbose"
)]
pub struct Args {
    #[arg(default_value = ".", help = "Target folder to compact")]
    pub target: PathBuf,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        help = "JPEG encoder quality (1-95, default: 80)",
        long_help = "JPEG encoder quality from 1 (smallest, worst) to 95 (largest, best). \
                     Applies to .jpg/.jpeg files only; PNG re-optimization is lossless and \
                     takes no quality parameter."
    )]
    pub quality: u8,

    #[arg(
        short = 'm',
        long = "min-size-kb",
        value_name = "KIB",
        default_value_t = DEFAULT_MIN_SIZE_KIB,
        help = "Skip files at or under this size in KiB (default: 600)",
        long_help = "Minimum size threshold in KiB. Files whose current size is at or under \
                     the threshold are skipped without being decoded."
    )]
    pub min_size_kb: u64,

    #[arg(
        long = "no-recursive",
        help = "Do not descend into subdirectories",
        long_help = "Disable recursion into subdirectories. Top-level-only processing is not \
                     implemented; with this flag the run visits zero files."
    )]
    pub no_recursive: bool,

    #[arg(
        short = 'n',
        long,
        help = "Report what would be compacted without writing anything"
    )]
    pub dry_run: bool,

    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "PATH",
        help = "Protected path never eligible for processing (repeatable)",
        long_help = "Mark a file as protected: it is classified as skipped and never decoded \
                     or overwritten. May be given multiple times."
    )]
    pub exclude: Vec<PathBuf>,

    #[arg(long, help = "Suppress progress and per-file output")]
    pub quiet: bool,

    #[arg(long, help = "Also report skipped files and their reasons")]
    pub verbose: bool,
}
