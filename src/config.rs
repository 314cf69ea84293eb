//! Resolved pipeline configuration.
//!
//! A [`PipelineConfig`] is produced by the caller (the CLI, a test, or an
//! embedding application) and is immutable once [`crate::pipeline::Pipeline`]
//! starts. Call [`PipelineConfig::validate`] before running; the pipeline does
//! so itself and refuses to start on an invalid configuration.

use std::path::{Path, PathBuf};

/// Extension of RapidMiner dataset files (without the leading dot).
pub const DAT_EXTENSION: &str = "dat";

/// Extension of generated output files (without the leading dot).
pub const CSV_EXTENSION: &str = "csv";

/// Extension of archives expanded before discovery (without the leading dot).
pub const ZIP_EXTENSION: &str = "zip";

/// Errors raised by configuration validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The root directory does not exist
    #[error("Root directory does not exist: {0}")]
    RootMissing(PathBuf),

    /// The root path exists but is not a directory
    #[error("Root path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    /// `move_files` was requested without an output directory
    #[error("Moving files was requested but no output directory was given")]
    MissingOutputDirectory,

    /// The output path exists but is not a directory
    #[error("Output path is not a directory: {0}")]
    OutputNotDirectory(PathBuf),

    /// A worker count of zero was requested
    #[error("Worker thread count must be at least 1")]
    ZeroThreads,
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Root of the tree to process
    pub root_directory: PathBuf,

    /// Delete every non-`.csv` file after conversion
    pub delete_non_csv: bool,

    /// Move converted `.csv` files into `output_directory`
    pub move_files: bool,

    /// Flat destination for converted files, required iff `move_files`
    pub output_directory: Option<PathBuf>,

    /// Worker pool size for the batch stages (`None` = one per logical CPU)
    pub threads: Option<usize>,
}

impl PipelineConfig {
    /// Create a configuration that only extracts, converts and prunes
    pub fn new(root_directory: impl Into<PathBuf>) -> Self {
        Self {
            root_directory: root_directory.into(),
            delete_non_csv: false,
            move_files: false,
            output_directory: None,
            threads: None,
        }
    }

    /// Enable or disable purging of non-`.csv` files
    pub fn with_delete_non_csv(mut self, delete: bool) -> Self {
        self.delete_non_csv = delete;
        self
    }

    /// Relocate converted files into `output_directory`
    pub fn with_output_directory(mut self, output_directory: impl Into<PathBuf>) -> Self {
        self.move_files = true;
        self.output_directory = Some(output_directory.into());
        self
    }

    /// Set the worker pool size
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Extension of the dataset files this configuration targets
    pub fn dat_extension(&self) -> &'static str {
        DAT_EXTENSION
    }

    /// Output directory, if relocation is enabled
    pub fn relocation_target(&self) -> Option<&Path> {
        if self.move_files {
            self.output_directory.as_deref()
        } else {
            None
        }
    }

    /// Check structural preconditions before any batch starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.root_directory.exists() {
            return Err(ConfigError::RootMissing(self.root_directory.clone()));
        }
        if !self.root_directory.is_dir() {
            return Err(ConfigError::RootNotDirectory(self.root_directory.clone()));
        }

        if self.move_files {
            match &self.output_directory {
                None => return Err(ConfigError::MissingOutputDirectory),
                Some(out) if out.exists() && !out.is_dir() => {
                    return Err(ConfigError::OutputNotDirectory(out.clone()));
                }
                Some(_) => {}
            }
        }

        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }

        Ok(())
    }
}
