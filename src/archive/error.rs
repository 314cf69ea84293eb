use std::path::PathBuf;

/// Errors that can occur while expanding a single archive
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The archive's contents are already present next to it
    #[error("Archive {} already extracted: {} exists", archive.display(), entry.display())]
    AlreadyExists {
        /// Archive being extracted
        archive: PathBuf,
        /// First destination path found to exist
        entry: PathBuf,
    },

    /// The file is not a readable ZIP archive
    #[error("Invalid ZIP archive {}: {source}", archive.display())]
    Zip {
        /// Archive being extracted
        archive: PathBuf,
        /// Underlying ZIP error
        #[source]
        source: zip::result::ZipError,
    },

    /// Reading the archive or writing an entry failed
    #[error("I/O error extracting {} to {}: {source}", archive.display(), path.display())]
    Io {
        /// Archive being extracted
        archive: PathBuf,
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ExtractError {
    /// Whether this is the benign "already extracted" condition
    pub fn is_already_exists(&self) -> bool {
        matches!(self, ExtractError::AlreadyExists { .. })
    }

    pub(crate) fn zip(archive: &std::path::Path, source: zip::result::ZipError) -> Self {
        ExtractError::Zip {
            archive: archive.to_path_buf(),
            source,
        }
    }

    pub(crate) fn io(
        archive: &std::path::Path,
        path: &std::path::Path,
        source: std::io::Error,
    ) -> Self {
        ExtractError::Io {
            archive: archive.to_path_buf(),
            path: path.to_path_buf(),
            source,
        }
    }
}
