use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid JPEG quality: {0}. Must be between 1 and 95")]
    InvalidQuality(u8),

    #[error("Target folder not found: {0}")]
    RootNotFound(PathBuf),

    #[error("Target path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Walkdir error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to replace {path}: {source}")]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CompactError>;
