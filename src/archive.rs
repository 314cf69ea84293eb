//! In-place expansion of ZIP archives found anywhere in the tree.
//!
//! Each archive is unpacked into its own containing directory. An archive
//! whose entries already exist at the destination is reported as
//! [`ExtractError::AlreadyExists`] before anything is written, which makes
//! re-running the pipeline over a partially processed tree safe.
//!
//! ```rust,no_run
//! use rmprep::archive::{extract_archive, find_archives};
//! use std::path::Path;
//!
//! for zip in find_archives(Path::new("data"))? {
//!     match extract_archive(&zip) {
//!         Ok(files) => println!("{}: {} files", zip.display(), files),
//!         Err(e) if e.is_already_exists() => println!("{} skipped", zip.display()),
//!         Err(e) => eprintln!("{}", e),
//!     }
//! }
//! # Ok::<(), rmprep::walker::WalkError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rayon::prelude::*;
use zip::ZipArchive;

use crate::config::ZIP_EXTENSION;
use crate::walker::{self, WalkError};

mod error;

pub use error::ExtractError;


/// One archive entry scheduled for extraction
#[derive(Debug)]
struct PlannedEntry {
    index: usize,
    target: PathBuf,
    is_dir: bool,
}

/// Recursively collect every `.zip` file under `root`
pub fn find_archives(root: &Path) -> Result<Vec<PathBuf>, WalkError> {
    walker::find_by_extension(root, ZIP_EXTENSION)
}

/// Directory an archive is extracted into (the archive's own parent)
pub fn extraction_target(archive_path: &Path) -> &Path {
    match archive_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Extract `archive_path` next to itself, returning the number of files written
pub fn extract_archive(archive_path: &Path) -> Result<usize, ExtractError> {
    let dest = extraction_target(archive_path);

    let file = File::open(archive_path)
        .map_err(|source| ExtractError::io(archive_path, archive_path, source))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|source| ExtractError::zip(archive_path, source))?;

    let plan = plan_entries(&mut archive, archive_path, dest)?;
    check_conflicts(&plan, archive_path, dest)?;

    let mut files_written = 0;
    for planned in &plan {
        if planned.is_dir {
            create_dirs(archive_path, &planned.target)?;
            continue;
        }

        if let Some(parent) = planned.target.parent() {
            create_dirs(archive_path, parent)?;
        }

        let mut entry = archive
            .by_index(planned.index)
            .map_err(|source| ExtractError::zip(archive_path, source))?;

        // create_new turns a concurrent writer into a structured AlreadyExists
        let mut outfile = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&planned.target)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    ExtractError::AlreadyExists {
                        archive: archive_path.to_path_buf(),
                        entry: planned.target.clone(),
                    }
                } else {
                    ExtractError::io(archive_path, &planned.target, source)
                }
            })?;

        io::copy(&mut entry, &mut outfile)
            .map_err(|source| ExtractError::io(archive_path, &planned.target, source))?;
        files_written += 1;
    }

    debug!(
        "Extracted {} files from {} into {}",
        files_written,
        archive_path.display(),
        dest.display()
    );
    Ok(files_written)
}

/// Extract every archive concurrently on the current rayon pool
///
/// Results are returned per archive; one failure never affects the others.
pub fn extract_all(archives: &[PathBuf]) -> Vec<(PathBuf, Result<usize, ExtractError>)> {
    archives
        .par_iter()
        .map(|archive| (archive.clone(), extract_archive(archive)))
        .collect()
}

fn plan_entries<R: io::Read + io::Seek>(
    archive: &mut ZipArchive<R>,
    archive_path: &Path,
    dest: &Path,
) -> Result<Vec<PlannedEntry>, ExtractError> {
    let mut plan = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|source| ExtractError::zip(archive_path, source))?;

        let Some(relative) = entry.enclosed_name() else {
            warn!(
                "Skipping unsafe entry '{}' in {}",
                entry.name(),
                archive_path.display()
            );
            continue;
        };

        plan.push(PlannedEntry {
            index,
            target: dest.join(relative),
            is_dir: entry.is_dir(),
        });
    }
    Ok(plan)
}

/// `create_dir_all` that reports a file in the way as already extracted
fn create_dirs(archive_path: &Path, dir: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(dir).map_err(|source| {
        if source.kind() == io::ErrorKind::AlreadyExists {
            ExtractError::AlreadyExists {
                archive: archive_path.to_path_buf(),
                entry: dir.to_path_buf(),
            }
        } else {
            ExtractError::io(archive_path, dir, source)
        }
    })
}

/// Reject the archive when any planned path is already taken
///
/// A path counts as taken when the entry itself exists (except a directory
/// entry over an existing directory) or when one of the directories leading
/// to it, below `dest`, exists as something other than a directory. An
/// archive made only of directories that all exist is taken as well.
fn check_conflicts(
    plan: &[PlannedEntry],
    archive_path: &Path,
    dest: &Path,
) -> Result<(), ExtractError> {
    let already_exists = |entry: &Path| ExtractError::AlreadyExists {
        archive: archive_path.to_path_buf(),
        entry: entry.to_path_buf(),
    };

    let mut all_present = !plan.is_empty();
    for planned in plan {
        // components from just below dest down to the entry itself
        let mut chain: Vec<&Path> = planned
            .target
            .ancestors()
            .take_while(|path| *path != dest)
            .collect();
        chain.reverse();

        for path in chain {
            let is_entry = path == planned.target.as_path();
            match fs::symlink_metadata(path) {
                Ok(meta) if is_entry && !(planned.is_dir && meta.is_dir()) => {
                    return Err(already_exists(path));
                }
                Ok(meta) if !is_entry && !meta.is_dir() => {
                    return Err(already_exists(path));
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    all_present = false;
                    break;
                }
                Err(source) => return Err(ExtractError::io(archive_path, path, source)),
            }
        }
        if !planned.is_dir {
            all_present = false;
        }
    }

    match plan.first() {
        Some(first) if all_present => Err(already_exists(&first.target)),
        _ => Ok(()),
    }
}
