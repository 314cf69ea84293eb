//! # rmprep
//!
//! A command-line tool for turning RapidMiner dataset trees into CSV files.
//!
//! ## Pipeline
//!
//! 1. Extract every `.zip` archive next to itself (already extracted ones are skipped)
//! 2. Convert each `<dir>/<dir>.dat` to `<dir>/<dir>.csv`
//! 3. Optionally delete everything that is not a `.csv`
//! 4. Optionally move the converted files into one output directory
//! 5. Remove directories left empty
//!
//! ## Usage
//!
//! ```bash
//! # Convert in place
//! rmprep RapidMiner/Data
//!
//! # Convert, keep only .csv files and collect them in one directory
//! rmprep RapidMiner/Data --delete-non-csv --output-dir RapidMiner/csv
//!
//! # Answer the questions on the terminal
//! rmprep --interactive
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    cli::init_logging(cli.verbosity());

    cli::dispatch(cli)
}
