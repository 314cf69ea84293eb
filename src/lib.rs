//! # rmprep - RapidMiner Dataset Preprocessor
//!
//! `rmprep` turns a directory tree of RapidMiner (KEEL-style) `.dat` dataset
//! files into plain `.csv` files, ready to be loaded by any tool that reads
//! CSV.
//!
//! ## Key Features
//!
//! - **Archive expansion**: every `.zip` in the tree is unpacked next to
//!   itself; archives whose contents are already present are skipped, so a
//!   run can be repeated safely.
//!
//! - **Canonical dataset discovery**: only the `.dat` file named after its
//!   containing directory (`iris/iris.dat`) is converted; fold files such as
//!   `iris-10-1tra.dat` are left alone.
//!
//! - **Header synthesis**: the `@inputs` and `@outputs` declarations become a
//!   single CSV header line; data rows are copied verbatim.
//!
//! - **Cleanup**: optional deletion of everything that is not a `.csv`,
//!   optional relocation of the results into one flat directory, and removal
//!   of directories left empty.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rmprep::config::PipelineConfig;
//! use rmprep::pipeline::run;
//!
//! let config = PipelineConfig::new("RapidMiner/Data").with_delete_non_csv(true);
//! let report = run(config)?;
//! println!("Converted {} datasets", report.datasets_converted);
//! # Ok::<(), rmprep::pipeline::PipelineError>(())
//! ```
//!
//! ## Dataset Format
//!
//! ```text
//! @relation abalone
//! @attribute Sex {M, F, I}
//! @attribute Rings integer [1, 29]
//! @inputs Sex
//! @outputs Rings
//! @data
//! M, 15
//! F, 7
//! ```
//!
//! converts to
//!
//! ```text
//! Sex, Rings
//! M, 15
//! F, 7
//! ```
//!
//! ## Architecture
//!
//! - [`walker`]: recursive file enumeration shared by all stages
//! - [`archive`]: in-place ZIP extraction
//! - [`locator`]: canonical dataset discovery
//! - [`convert`]: `.dat` to `.csv` conversion
//! - [`purge`]: deletion of non-CSV files
//! - [`relocate`]: moving results into an output directory
//! - [`prune`]: removal of empty directories
//! - [`pipeline`]: orchestration, worker pool and run report
//! - [`config`]: the resolved run configuration

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod archive;
pub mod config;
pub mod convert;
pub mod locator;
pub mod pipeline;
pub mod prune;
pub mod purge;
pub mod relocate;
pub mod walker;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::archive::{extract_archive, find_archives, ExtractError};
    pub use crate::config::{ConfigError, PipelineConfig, CSV_EXTENSION, DAT_EXTENSION};
    pub use crate::convert::{convert_file, convert_lines, csv_path_for, ConvertError};
    pub use crate::locator::find_dataset_files;
    pub use crate::pipeline::{
        run, ItemFailure, Pipeline, PipelineError, PipelineReport, Stage,
    };
    pub use crate::prune::prune_empty_dirs;
    pub use crate::purge::purge_non_csv;
    pub use crate::relocate::{relocate_all, RelocateError};
}
