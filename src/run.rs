use indicatif::{ProgressBar, ProgressStyle};

use crate::classify::{classify, Decision};
use crate::compress::{compact_file, FileOutcome};
use crate::config::CompactorConfig;
use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use crate::error::Result;
use crate::logger;
use crate::utils::{format_size, savings_percent};
use crate::walk::candidate_files;
use crate::{detail, error, info, warn};

/// Per-run accumulator. Created at run start, updated once per file, read
/// once at run end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub compressed: usize,
    pub skipped: usize,
    pub unchanged: usize,
    pub failed: usize,
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl RunSummary {
    fn record_compressed(&mut self, original: u64, compressed: u64) {
        self.compressed += 1;
        self.original_bytes += original;
        self.compressed_bytes += compressed;
    }

    pub fn savings_percent(&self) -> f64 {
        savings_percent(self.original_bytes, self.compressed_bytes)
    }
}

/// Walk the target tree and compact every eligible file, one at a time.
/// A single file's failure is logged and counted, never fatal.
pub fn run(config: &CompactorConfig) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    let pb = if logger::is_quiet() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template(PROGRESS_SPINNER_TEMPLATE)
            .expect("Invalid progress template"),
    );

    for item in candidate_files(&config.root, config.recursive) {
        let path = match item {
            Ok(path) => path,
            Err(e) => {
                summary.failed += 1;
                pb.suspend(|| error!("Walk error: {}", e));
                continue;
            }
        };

        let display = path
            .strip_prefix(&config.root)
            .unwrap_or(&path)
            .display()
            .to_string();
        pb.set_message(format!("Scanning {}", display));

        match classify(&path, config) {
            Ok(Decision::Skip(reason)) => {
                summary.skipped += 1;
                pb.suspend(|| detail!("Skipped {}: {}", display, reason.describe()));
            }
            Ok(Decision::Process(kind, original)) => {
                match compact_file(&path, kind, original, config) {
                    Ok(FileOutcome::Compressed {
                        original,
                        compressed,
                    }) => {
                        summary.record_compressed(original, compressed);
                        let label = if config.dry_run {
                            "Would compact"
                        } else {
                            "Compacted"
                        };
                        pb.suspend(|| {
                            info!(
                                "✅ {} {}: {} -> {} (saved {:.1}%)",
                                label,
                                display,
                                format_size(original),
                                format_size(compressed),
                                savings_percent(original, compressed)
                            )
                        });
                    }
                    Ok(FileOutcome::Unchanged {
                        original,
                        attempted,
                    }) => {
                        summary.unchanged += 1;
                        pb.suspend(|| {
                            detail!(
                                "Left {} unchanged: {} recompressed would not beat {}",
                                display,
                                format_size(attempted),
                                format_size(original)
                            )
                        });
                    }
                    Err(e) => {
                        summary.failed += 1;
                        pb.suspend(|| error!("Failed {}: {}", display, e));
                    }
                }
            }
            Err(e) => {
                summary.failed += 1;
                pb.suspend(|| error!("Failed {}: {}", display, e));
            }
        }
    }

    pb.finish_and_clear();
    print_summary(config, &summary);

    Ok(summary)
}

fn print_summary(config: &CompactorConfig, summary: &RunSummary) {
    info!("");
    if summary.compressed == 0 {
        info!("⚠️  No images compacted.");
    } else {
        info!("📊 Compaction Summary:");
        info!("  📁 Files compacted: {}", summary.compressed);
        info!(
            "  📊 Total original size: {} ({} bytes)",
            format_size(summary.original_bytes),
            summary.original_bytes
        );
        info!(
            "  📈 Total compacted size: {} ({} bytes)",
            format_size(summary.compressed_bytes),
            summary.compressed_bytes
        );
        info!("  🎯 Overall savings: {:.1}%", summary.savings_percent());
        if config.dry_run {
            info!("  📝 Dry run: no files were modified");
        }
    }
    if summary.failed > 0 {
        warn!("{} file(s) failed; see messages above", summary.failed);
    }
}
