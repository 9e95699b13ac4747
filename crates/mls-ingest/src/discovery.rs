//! Listing file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::format::SourceFormat;

/// Lists every supported listing file directly inside `dir`.
///
/// Returns files sorted by filename. Subdirectories are not descended into.
pub fn discover_listing_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let read_error = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && SourceFormat::from_path(&path).is_some() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Expand command-line inputs: directories become their listing files, files
/// are kept as given. Order of `inputs` is preserved.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(discover_listing_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
