//! TOML configuration file support.
//!
//! Every command-line option can also be set in a config file:
//!
//! ```toml
//! # rmprep.toml
//! [pipeline]
//! directory = "RapidMiner/Data"
//! delete_non_csv = true
//! move_files = true
//! output_directory = "RapidMiner/csv"
//! threads = 8
//! ```
//!
//! Flags given on the command line take precedence over the file.

use anyhow::{bail, Context, Result};
use rmprep::config::PipelineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Cli;

/// Root configuration structure for rmprep.toml files.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineSection,
}

/// The `[pipeline]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSection {
    /// Root directory of the dataset tree.
    pub directory: Option<PathBuf>,

    /// Delete non-.csv files after conversion.
    pub delete_non_csv: Option<bool>,

    /// Move converted files into `output_directory`.
    pub move_files: Option<bool>,

    /// Flat output directory.
    pub output_directory: Option<PathBuf>,

    /// Worker thread count.
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

/// Options merged from the command line and config file, possibly incomplete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub directory: Option<PathBuf>,
    pub delete_non_csv: bool,
    pub move_files: bool,
    pub output_directory: Option<PathBuf>,
    pub threads: Option<usize>,
}

impl Settings {
    /// Merge command-line flags over config file values
    pub fn resolve(cli: &Cli, file: &Config) -> Self {
        let section = &file.pipeline;

        let output_directory = cli
            .output_dir
            .clone()
            .or_else(|| section.output_directory.clone());

        Self {
            directory: cli.directory.clone().or_else(|| section.directory.clone()),
            delete_non_csv: cli.delete_non_csv || section.delete_non_csv.unwrap_or(false),
            move_files: cli.move_files
                || cli.output_dir.is_some()
                || section.move_files.unwrap_or(false),
            output_directory,
            threads: cli.threads.or(section.threads),
        }
    }

    /// Turn complete settings into a pipeline configuration
    ///
    /// Structural checks (root exists, output given when moving) are left to
    /// [`PipelineConfig::validate`].
    pub fn into_pipeline_config(self) -> Result<PipelineConfig> {
        let Some(directory) = self.directory else {
            bail!("No directory given; pass DIRECTORY, set it in the config file or use --interactive");
        };

        Ok(PipelineConfig {
            root_directory: directory,
            delete_non_csv: self.delete_non_csv,
            move_files: self.move_files,
            output_directory: self.output_directory,
            threads: self.threads,
        })
    }
}
