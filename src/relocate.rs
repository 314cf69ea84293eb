//! Moving converted `.csv` files into a flat output directory.
//!
//! Relocation never overwrites: a name that already exists in the output
//! directory, or two datasets in the batch that would land on the same name,
//! fail the whole stage.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;

use crate::convert::csv_path_for;

/// Errors that can occur while relocating converted files
#[derive(Debug, thiserror::Error)]
pub enum RelocateError {
    /// The destination already holds a file of the same name
    #[error("Cannot move {} to {}: destination already exists", from.display(), to.display())]
    DestinationExists {
        /// Converted file being moved
        from: PathBuf,
        /// Existing destination
        to: PathBuf,
    },

    /// Two files in the batch share a file name
    #[error(
        "Cannot move both {} and {} into one flat directory: same file name",
        first.display(),
        second.display()
    )]
    DuplicateName {
        /// First file with the name
        first: PathBuf,
        /// Second file with the name
        second: PathBuf,
    },

    /// A file has no file name component
    #[error("Path has no file name: {}", .0.display())]
    NoFileName(PathBuf),

    /// Creating the output directory or moving a file failed
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    Io {
        /// Source path
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Move the `.csv` generated for `dat_path` into `output_dir`, keeping its name
pub fn relocate_dataset(dat_path: &Path, output_dir: &Path) -> Result<PathBuf, RelocateError> {
    let csv_path = csv_path_for(dat_path);
    let name = csv_path
        .file_name()
        .ok_or_else(|| RelocateError::NoFileName(csv_path.clone()))?;
    let destination = output_dir.join(name);

    if fs::symlink_metadata(&destination).is_ok() {
        return Err(RelocateError::DestinationExists {
            from: csv_path,
            to: destination,
        });
    }

    move_file(&csv_path, &destination).map_err(|source| RelocateError::Io {
        from: csv_path.clone(),
        to: destination.clone(),
        source,
    })?;

    debug!("Moved {} to {}", csv_path.display(), destination.display());
    Ok(destination)
}

/// Relocate the converted output of every dataset concurrently
///
/// Creates `output_dir` when missing. Stops at the first failure.
pub fn relocate_all(
    dat_files: &[PathBuf],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, RelocateError> {
    check_unique_names(dat_files)?;

    fs::create_dir_all(output_dir).map_err(|source| RelocateError::Io {
        from: output_dir.to_path_buf(),
        to: output_dir.to_path_buf(),
        source,
    })?;

    dat_files
        .par_iter()
        .map(|dat| relocate_dataset(dat, output_dir))
        .collect()
}

fn check_unique_names(dat_files: &[PathBuf]) -> Result<(), RelocateError> {
    let mut seen: HashMap<OsString, &PathBuf> = HashMap::with_capacity(dat_files.len());
    for dat in dat_files {
        let csv = csv_path_for(dat);
        let name = csv
            .file_name()
            .ok_or_else(|| RelocateError::NoFileName(csv.clone()))?
            .to_os_string();
        if let Some(first) = seen.insert(name, dat) {
            return Err(RelocateError::DuplicateName {
                first: csv_path_for(first),
                second: csv,
            });
        }
    }
    Ok(())
}

/// Rename, falling back to copy-and-delete across filesystems
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(e),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn converted_dataset(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        let dat = dir.join(format!("{}.dat", name));
        fs::write(&dat, "1\n").unwrap();
        fs::write(dir.join(format!("{}.csv", name)), "1\n").unwrap();
        dat
    }

    #[test]
    fn test_moves_csv_flat_into_output() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let iris = converted_dataset(&dir.path().join("a/b"), "iris");
        let wine = converted_dataset(dir.path(), "wine");

        let mut moved = relocate_all(&[iris.clone(), wine.clone()], &out).unwrap();
        moved.sort();

        assert_eq!(moved, vec![out.join("iris.csv"), out.join("wine.csv")]);
        assert!(!csv_path_for(&iris).exists());
        assert!(!csv_path_for(&wine).exists());
        assert!(iris.exists());
    }

    #[test]
    fn test_existing_destination_fails() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("iris.csv"), "old").unwrap();
        let iris = converted_dataset(dir.path(), "iris");

        let err = relocate_dataset(&iris, &out).unwrap_err();

        assert!(matches!(err, RelocateError::DestinationExists { .. }));
        assert_eq!(fs::read_to_string(out.join("iris.csv")).unwrap(), "old");
        assert!(csv_path_for(&iris).exists());
    }

    #[test]
    fn test_duplicate_names_rejected_before_moving() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        let first = converted_dataset(&dir.path().join("x"), "iris");
        let second = converted_dataset(&dir.path().join("y"), "iris");

        let err = relocate_all(&[first.clone(), second.clone()], &out).unwrap_err();

        assert!(matches!(err, RelocateError::DuplicateName { .. }));
        assert!(csv_path_for(&first).exists());
        assert!(csv_path_for(&second).exists());
    }

    #[test]
    fn test_missing_csv_is_io_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir(&out).unwrap();

        let err = relocate_dataset(&dir.path().join("ghost/ghost.dat"), &out).unwrap_err();
        assert!(matches!(err, RelocateError::Io { .. }));
    }
}
