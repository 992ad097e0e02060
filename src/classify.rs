use std::fs;
use std::path::Path;

use crate::config::CompactorConfig;
use crate::error::Result;

/// Image formats this tool handles, decided from the file extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => Some(ImageKind::Jpeg),
            Some("png") => Some(ImageKind::Png),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedExtension,
    Protected,
    /// File size was at or under the configured threshold.
    BelowThreshold(u64),
}

impl SkipReason {
    pub fn describe(&self) -> String {
        match self {
            SkipReason::UnsupportedExtension => "unsupported extension".to_string(),
            SkipReason::Protected => "protected path".to_string(),
            SkipReason::BelowThreshold(size) => {
                format!("{} bytes, at or under size threshold", size)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Process(ImageKind, u64),
    Skip(SkipReason),
}

/// Decide what to do with one file. Reads metadata for the size check but
/// never opens the file contents.
pub fn classify(path: &Path, config: &CompactorConfig) -> Result<Decision> {
    let kind = match ImageKind::from_path(path) {
        Some(kind) => kind,
        None => return Ok(Decision::Skip(SkipReason::UnsupportedExtension)),
    };

    if config.is_protected(path) {
        return Ok(Decision::Skip(SkipReason::Protected));
    }

    let size = fs::metadata(path)?.len();
    if size <= config.min_size_bytes {
        return Ok(Decision::Skip(SkipReason::BelowThreshold(size)));
    }

    Ok(Decision::Process(kind, size))
}
