//! Interactive completion of settings on the terminal.
//!
//! Questions are re-asked in a loop until a valid answer arrives; declining
//! the final confirmation starts the questionnaire over. End of input aborts.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::config::Settings;

/// Line-oriented question/answer helper over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` and read one trimmed line
    pub fn ask_line(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("Failed to read answer")?;
        if read == 0 {
            bail!("Input closed while waiting for an answer");
        }
        Ok(answer.trim().to_string())
    }

    /// Ask until the answer is `y` or `n`
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        let mut answer = self.ask_line(&format!("{} (y/n)", question))?;
        loop {
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => answer = self.ask_line("Please enter a valid input (y/n)")?,
            }
        }
    }

    /// Ask until a non-empty path is given
    pub fn ask_path(&mut self, question: &str) -> Result<PathBuf> {
        let mut answer = self.ask_line(question)?;
        while answer.is_empty() {
            answer = self.ask_line("Please enter a directory")?;
        }
        Ok(PathBuf::from(answer))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

/// Fill in `base` by asking the user, confirming the result unless `assume_yes`
///
/// A directory already present in `base` is kept; every other option is
/// asked again on each round.
pub fn complete_interactively<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    base: Settings,
    assume_yes: bool,
) -> Result<Settings> {
    loop {
        let directory = match &base.directory {
            Some(dir) => dir.clone(),
            None => prompter.ask_path("Please enter the directory:")?,
        };

        let delete_non_csv =
            prompter.ask_yes_no("\nDo you want to delete non .csv files after processing them?")?;
        let move_files =
            prompter.ask_yes_no("\nDo you want to move the processed files to a new directory?")?;
        let output_directory = if move_files {
            Some(prompter.ask_path("\nPlease enter the output directory:")?)
        } else {
            None
        };

        let settings = Settings {
            directory: Some(directory),
            delete_non_csv,
            move_files,
            output_directory,
            threads: base.threads,
        };

        prompter.say("\nSummary of options:")?;
        prompter.say(&summary(&settings))?;

        if assume_yes || prompter.ask_yes_no("Do you want to continue?")? {
            return Ok(settings);
        }
    }
}

/// Human-readable listing of the settings
pub fn summary(settings: &Settings) -> String {
    let path_or_none = |p: &Option<PathBuf>| {
        p.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    };
    let yes_no = |b: bool| if b { "y" } else { "n" };

    format!(
        "Directory: {}\nDelete non .csv files: {}\nMove files to new directory: {}\nOutput directory: {}",
        path_or_none(&settings.directory),
        yes_no(settings.delete_non_csv),
        yes_no(settings.move_files),
        path_or_none(&settings.output_directory),
    )
}
