use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod prompt;
mod run;

/// rmprep - convert RapidMiner .dat dataset trees to .csv
#[derive(Parser)]
#[command(name = "rmprep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Root directory of the dataset tree (prompted for when omitted)
    #[arg(value_name = "DIRECTORY")]
    directory: Option<PathBuf>,

    /// Delete every file that is not a .csv after conversion
    #[arg(short = 'd', long)]
    delete_non_csv: bool,

    /// Move converted .csv files into the output directory
    #[arg(short = 'm', long)]
    move_files: bool,

    /// Flat output directory for converted files (implies --move-files)
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Worker threads for extraction, conversion and relocation
    #[arg(short = 'j', long, value_name = "N")]
    threads: Option<usize>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Ask for every option on the terminal
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Skip the confirmation question in interactive mode
    #[arg(short = 'y', long)]
    yes: bool,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    run::run(cli)
}
