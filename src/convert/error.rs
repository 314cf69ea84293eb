use std::path::PathBuf;

use super::markers::AmbiguousMarker;

/// Errors that can occur while converting one dataset file
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The dataset file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Dataset file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The generated `.csv` file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output `.csv` path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// More than one line carries the same header marker
    #[error("Malformed dataset {}: {source}", path.display())]
    AmbiguousMarker {
        /// Dataset file path
        path: PathBuf,
        /// Which marker was ambiguous and how often it matched
        #[source]
        source: AmbiguousMarker,
    },
}

impl ConvertError {
    /// Path of the file the error refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConvertError::Read { path, .. }
            | ConvertError::Write { path, .. }
            | ConvertError::AmbiguousMarker { path, .. } => path,
        }
    }
}
