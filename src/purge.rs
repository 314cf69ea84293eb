//! Removal of every file that is not a `.csv`.
//!
//! Runs after conversion, so it takes out the original `.dat` sources,
//! already-extracted archives and any other files that came along with them.
//! Deletion is unconditional and irreversible.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::CSV_EXTENSION;
use crate::walker::{self, WalkError};

/// Outcome of a purge sweep
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    /// Files that were deleted
    pub deleted: Vec<PathBuf>,
    /// Files that could not be deleted, with the cause
    pub failed: Vec<(PathBuf, io::Error)>,
}

/// Delete every file under `root` whose extension is not exactly `.csv`
///
/// A failure to delete one file is recorded and the sweep continues; only a
/// failure to traverse the tree aborts it.
pub fn purge_non_csv(root: &Path) -> Result<PurgeOutcome, WalkError> {
    let doomed = walker::find_files(root, |path| !walker::has_extension(path, CSV_EXTENSION))?;

    let mut outcome = PurgeOutcome::default();
    for file in doomed {
        match fs::remove_file(&file) {
            Ok(()) => {
                info!("Deleted file: {}", file.display());
                outcome.deleted.push(file);
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", file.display(), e);
                outcome.failed.push((file, e));
            }
        }
    }
    Ok(outcome)
}
