//! Bottom-up removal of directories left empty by the earlier stages.
//!
//! The root passed in is never removed, only its descendants. Symbolic links
//! to directories count as entries and are never descended into.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

/// A directory could not be listed or removed
#[derive(Debug, thiserror::Error)]
#[error("Failed to prune {}: {source}", path.display())]
pub struct PruneError {
    /// Directory being processed
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: io::Error,
}

/// Remove every empty directory below `root`, returning how many were removed
///
/// Children are processed before their parent, so a chain of directories
/// that only contain each other collapses in a single call.
pub fn prune_empty_dirs(root: &Path) -> Result<usize, PruneError> {
    let mut removed = 0;
    prune_children(root, &mut removed)?;
    Ok(removed)
}

fn prune_children(dir: &Path, removed: &mut usize) -> Result<(), PruneError> {
    for subdir in subdirectories(dir)? {
        prune_children(&subdir, removed)?;

        if is_empty(&subdir)? {
            fs::remove_dir(&subdir).map_err(|source| PruneError {
                path: subdir.clone(),
                source,
            })?;
            debug!("Removed empty directory {}", subdir.display());
            *removed += 1;
        }
    }
    Ok(())
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>, PruneError> {
    let wrap = |source| PruneError {
        path: dir.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(wrap)? {
        let entry = entry.map_err(wrap)?;
        if entry.file_type().map_err(wrap)?.is_dir() {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}

fn is_empty(dir: &Path) -> Result<bool, PruneError> {
    let mut entries = fs::read_dir(dir).map_err(|source| PruneError {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(entries.next().is_none())
}
