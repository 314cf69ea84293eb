use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "colorized_output")]
use console::style;

/// Pipeline stage an item failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Archive extraction
    Extract,
    /// Dataset conversion
    Convert,
    /// Non-CSV purge
    Purge,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::Convert => write!(f, "convert"),
            Stage::Purge => write!(f, "purge"),
        }
    }
}

/// One item that was skipped because processing it failed
#[derive(Debug, Clone)]
pub struct ItemFailure {
    /// Stage the failure happened in
    pub stage: Stage,
    /// File the failure refers to
    pub path: PathBuf,
    /// Full error description including the cause
    pub message: String,
}

impl ItemFailure {
    pub(crate) fn new(stage: Stage, path: impl Into<PathBuf>, error: &dyn std::error::Error) -> Self {
        Self {
            stage,
            path: path.into(),
            message: error_chain(error),
        }
    }
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.path.display(), self.message)
    }
}

/// Counts and failures gathered over one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// `.zip` files found in the tree
    pub archives_found: usize,
    /// Archives extracted in this run
    pub archives_extracted: usize,
    /// Archives skipped because their contents already existed
    pub archives_skipped: usize,
    /// Canonical dataset files found
    pub datasets_found: usize,
    /// Dataset files converted to `.csv`
    pub datasets_converted: usize,
    /// Non-CSV files deleted
    pub files_purged: usize,
    /// Converted files moved to the output directory
    pub files_relocated: usize,
    /// Empty directories removed
    pub directories_pruned: usize,
    /// Per-item failures, in no particular order
    pub failures: Vec<ItemFailure>,
}

impl PipelineReport {
    /// Whether any item failed
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Failures recorded for one stage
    pub fn failures_in(&self, stage: Stage) -> impl Iterator<Item = &ItemFailure> {
        self.failures.iter().filter(move |f| f.stage == stage)
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();

            output.push_str(&format!("{}\n", style("rmprep Run Summary").bold().cyan()));
            output.push_str(&format!("{}\n", style("==================").cyan()));

            for (label, value) in self.count_lines() {
                output.push_str(&format!("  {:<22} {}\n", label, style(value).bold()));
            }

            if !self.failures.is_empty() {
                output.push('\n');
                output.push_str(&format!("{}\n", style("Failures:").red().bold()));
                for failure in &self.failures {
                    output.push_str(&format!(
                        "[{}] {} {}: {}\n",
                        FAIL,
                        style(failure.stage).yellow(),
                        failure.path.display(),
                        failure.message
                    ));
                }
            }

            output.push('\n');
            if self.has_failures() {
                output.push_str(&format!(
                    "{}\n",
                    style(format!("Done with {} failures", self.failures.len()))
                        .red()
                        .bold()
                ));
            } else {
                output.push_str(&format!("[{}] {}\n", OK, style("Done!").green().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }

    fn count_lines(&self) -> [(&'static str, usize); 8] {
        [
            ("Archives found:", self.archives_found),
            ("Archives extracted:", self.archives_extracted),
            ("Archives skipped:", self.archives_skipped),
            ("Datasets found:", self.datasets_found),
            ("Datasets converted:", self.datasets_converted),
            ("Files purged:", self.files_purged),
            ("Files relocated:", self.files_relocated),
            ("Directories pruned:", self.directories_pruned),
        ]
    }
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rmprep Run Summary")?;
        writeln!(f, "==================")?;

        for (label, value) in self.count_lines() {
            writeln!(f, "  {:<22} {}", label, value)?;
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failures:")?;
            for failure in &self.failures {
                writeln!(f, "  {}", failure)?;
            }
        }

        writeln!(f)?;
        if self.has_failures() {
            writeln!(f, "Done with {} failures", self.failures.len())
        } else {
            writeln!(f, "Done!")
        }
    }
}

/// Render an error and all of its sources on one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_display_lists_counts_and_failures() {
        let mut report = PipelineReport {
            datasets_found: 3,
            datasets_converted: 2,
            ..Default::default()
        };
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        report
            .failures
            .push(ItemFailure::new(Stage::Convert, "x/x.dat", &err));

        let text = report.to_string();

        assert!(report.has_failures());
        assert!(text.contains("Datasets found:"));
        assert!(text.contains("[convert] x/x.dat: denied"));
        assert!(text.contains("Done with 1 failures"));
        assert_eq!(report.failures_in(Stage::Convert).count(), 1);
        assert_eq!(report.failures_in(Stage::Extract).count(), 0);
    }

    #[test]
    fn test_clean_report() {
        let report = PipelineReport::default();
        assert!(!report.has_failures());
        assert!(report.to_string().ends_with("Done!\n"));
        assert!(report.format_colored().contains("Done!"));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer")]
        struct Outer(#[source] io::Error);

        let err = Outer(io::Error::new(io::ErrorKind::Other, "inner"));
        assert_eq!(error_chain(&err), "outer: inner");
    }
}
