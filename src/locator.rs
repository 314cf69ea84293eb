//! Discovery of canonical dataset files.
//!
//! A RapidMiner dataset directory holds one canonical data file named after
//! the directory itself (`abalone/abalone.dat`). Other files with the same
//! extension in that directory are ignored.

use std::path::{Path, PathBuf};

use crate::walker::{self, WalkError};

/// Recursively find every canonical dataset file with `extension` under `root`
pub fn find_dataset_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, WalkError> {
    walker::find_files(root, |path| {
        walker::has_extension(path, extension) && is_canonical_dataset(path)
    })
}

/// Whether the file stem equals the name of the immediately containing directory
pub fn is_canonical_dataset(path: &Path) -> bool {
    let Some(stem) = path.file_stem() else {
        return false;
    };
    let Some(directory_name) = path.parent().and_then(Path::file_name) else {
        return false;
    };
    stem == directory_name
}
