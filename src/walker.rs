//! Recursive file enumeration shared by every stage.
//!
//! Symbolic links are not followed, so a link cycle inside the tree cannot
//! make the walk run forever. Result order across sibling directories is
//! whatever the filesystem yields and must not be relied upon.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A directory in the tree could not be read
#[derive(Debug, thiserror::Error)]
#[error("Failed to walk {}: {source}", path.display())]
pub struct WalkError {
    /// Path that failed (the root when walkdir reports none)
    pub path: PathBuf,
    /// Underlying traversal error
    #[source]
    pub source: walkdir::Error,
}

impl WalkError {
    fn new(root: &Path, source: walkdir::Error) -> Self {
        let path = source.path().unwrap_or(root).to_path_buf();
        Self { path, source }
    }
}

/// Collect every regular file under `root` (at any depth) accepted by `predicate`
pub fn find_files<F>(root: &Path, mut predicate: F) -> Result<Vec<PathBuf>, WalkError>
where
    F: FnMut(&Path) -> bool,
{
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| WalkError::new(root, source))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if predicate(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Collect every file under `root` whose extension is exactly `extension`
pub fn find_by_extension(root: &Path, extension: &str) -> Result<Vec<PathBuf>, WalkError> {
    find_files(root, |path| has_extension(path, extension))
}

/// Case-sensitive extension check, `extension` given without the dot
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}
