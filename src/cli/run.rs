use anyhow::{Context, Result};
use log::info;
use std::io;

use rmprep::pipeline::Pipeline;

use super::config::{Config, Settings};
use super::prompt::{self, Prompter};
use super::Cli;

/// Resolve settings, run the pipeline and print the report
pub fn run(cli: Cli) -> Result<()> {
    let file_config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let mut settings = Settings::resolve(&cli, &file_config);
    if cli.interactive || settings.directory.is_none() {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        settings = prompt::complete_interactively(&mut prompter, settings, cli.yes)?;
    }

    info!("rmprep - RapidMiner .dat to .csv");
    info!("================================");
    for line in prompt::summary(&settings).lines() {
        info!("{}", line);
    }

    let config = settings.into_pipeline_config()?;
    let pipeline = Pipeline::new(config).context("Cannot start pipeline")?;

    info!("Starting pipeline...");
    let report = pipeline.run().context("Pipeline aborted")?;

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    // Exit with error code if any item was skipped
    if report.has_failures() {
        std::process::exit(1);
    }

    Ok(())
}
