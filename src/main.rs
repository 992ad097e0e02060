use std::process::ExitCode;

use clap::Parser;

use img_compact::cli::Args;
use img_compact::utils::format_size;
use img_compact::{error, info, logger, warn, CompactorConfig};

fn main() -> ExitCode {
    let args = Args::parse();
    logger::set_output_level(args.quiet, args.verbose);

    // Fatal setup errors exit before any file is touched.
    let config = match CompactorConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    info!("🗜️  Compacting images under {:?}", config.root);
    info!(
        "📏 Size threshold: only files over {}",
        format_size(config.min_size_bytes)
    );
    info!("🎚️  JPEG quality: {}", config.jpeg_quality);
    if config.dry_run {
        info!("📝 Dry run: nothing will be written");
    } else {
        warn!("In-place mode: originals are overwritten when the result is smaller");
    }

    match img_compact::run(&config) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}
