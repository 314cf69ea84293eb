//! Orchestration of the four-stage tree sweep.
//!
//! 1. **Unzip**: every `.zip` in the tree is extracted next to itself (batch)
//! 2. **Discover + convert**: canonical `.dat` files become `.csv` (batch)
//! 3. **Cleanup**: optional purge of non-CSV files, optional relocation of
//!    the converted files (batch), then pruning of empty directories
//!
//! Batch stages fan out over a fixed-size worker pool and the orchestrator
//! waits for a whole batch before starting the next stage. Per-item failures
//! are collected in the [`PipelineReport`]; structural failures abort the
//! run with a [`PipelineError`].
//!
//! ```rust,no_run
//! use rmprep::config::PipelineConfig;
//! use rmprep::pipeline::Pipeline;
//!
//! let config = PipelineConfig::new("RapidMiner/Data")
//!     .with_delete_non_csv(true)
//!     .with_output_directory("RapidMiner/csv");
//! let report = Pipeline::new(config)?.run()?;
//! println!("{}", report);
//! # Ok::<(), rmprep::pipeline::PipelineError>(())
//! ```

use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::archive;
use crate::config::PipelineConfig;
use crate::convert;
use crate::locator;
use crate::prune;
use crate::purge;
use crate::relocate;

mod error;
mod report;

pub use error::PipelineError;
pub use report::{ItemFailure, PipelineReport, Stage};


/// A validated configuration bound to its worker pool
pub struct Pipeline {
    config: PipelineConfig,
    pool: ThreadPool,
}

impl Pipeline {
    /// Validate `config` and build the worker pool
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;

        let mut builder =
            ThreadPoolBuilder::new().thread_name(|index| format!("rmprep-worker-{}", index));
        if let Some(threads) = config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        Ok(Self { config, pool })
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of workers used by the batch stages
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every stage to completion
    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        let root = self.config.root_directory.as_path();
        let mut report = PipelineReport::default();

        info!(
            "Processing {} with {} workers",
            root.display(),
            self.worker_count()
        );

        self.expand_archives(root, &mut report)?;
        let converted = self.convert_datasets(root, &mut report)?;

        if self.config.delete_non_csv {
            info!("Deleting non .csv files");
            let outcome = purge::purge_non_csv(root)?;
            report.files_purged = outcome.deleted.len();
            for (path, error) in outcome.failed {
                report
                    .failures
                    .push(ItemFailure::new(Stage::Purge, path, &error));
            }
        }

        if let Some(output_dir) = self.config.relocation_target() {
            info!(
                "Moving {} converted files to {}",
                converted.len(),
                output_dir.display()
            );
            let moved = self
                .pool
                .install(|| relocate::relocate_all(&converted, output_dir))?;
            report.files_relocated = moved.len();
        }

        report.directories_pruned = prune::prune_empty_dirs(root)?;
        info!("Removed {} empty directories", report.directories_pruned);

        Ok(report)
    }

    fn expand_archives(&self, root: &Path, report: &mut PipelineReport) -> Result<(), PipelineError> {
        let archives = archive::find_archives(root)?;
        report.archives_found = archives.len();
        info!("Archives found: {}", archives.len());

        let results = self.pool.install(|| archive::extract_all(&archives));
        for (path, result) in results {
            match result {
                Ok(_) => report.archives_extracted += 1,
                Err(e) if e.is_already_exists() => {
                    info!("File: {} already exists, skipping", path.display());
                    report.archives_skipped += 1;
                }
                Err(e) => {
                    warn!("{}", e);
                    report
                        .failures
                        .push(ItemFailure::new(Stage::Extract, path, &e));
                }
            }
        }
        Ok(())
    }

    /// Convert every canonical dataset, returning the ones that succeeded
    fn convert_datasets(
        &self,
        root: &Path,
        report: &mut PipelineReport,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        let datasets = locator::find_dataset_files(root, self.config.dat_extension())?;
        report.datasets_found = datasets.len();
        info!("Files found: {}", datasets.len());

        let results = self.pool.install(|| convert::convert_all(&datasets));

        let mut converted = Vec::with_capacity(results.len());
        for (path, result) in results {
            match result {
                Ok(_) => converted.push(path),
                Err(e) => {
                    warn!("{}", e);
                    report
                        .failures
                        .push(ItemFailure::new(Stage::Convert, path, &e));
                }
            }
        }
        report.datasets_converted = converted.len();
        Ok(converted)
    }
}

/// Validate `config` and run the whole pipeline
pub fn run(config: PipelineConfig) -> Result<PipelineReport, PipelineError> {
    Pipeline::new(config)?.run()
}
