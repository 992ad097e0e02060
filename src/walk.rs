use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Lazily enumerate files under `root`, visiting the files of each directory
/// in stable name order. The sequence is re-derived from filesystem state on
/// every call, so it is restartable by construction.
///
/// With `recursive` disabled the sequence is empty: top-level-only processing
/// is declared but not implemented.
pub fn candidate_files(
    root: &Path,
    recursive: bool,
) -> Box<dyn Iterator<Item = Result<PathBuf>>> {
    if !recursive {
        return Box::new(std::iter::empty());
    }

    let walker = WalkDir::new(root).sort_by_file_name().into_iter();
    Box::new(walker.filter_map(|entry| match entry {
        Ok(entry) => {
            if entry.file_type().is_file() {
                Some(Ok(entry.into_path()))
            } else {
                None
            }
        }
        Err(e) => Some(Err(e.into())),
    }))
}
