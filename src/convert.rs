//! RapidMiner `.dat` to `.csv` conversion
//!
//! A dataset file is a sequence of text lines. Lines containing `@` are
//! attribute declarations; every other line is a data row. The generated CSV
//! keeps the data rows verbatim and, when both an `@inputs` and an
//! `@outputs` line exist, prepends the header `<inputs>, <outputs>`.
//!
//! ```text
//! @relation abalone          a, b, c
//! @inputs a, b          =>   1,2,3
//! @outputs c                 4,5,6
//! @data
//! 1,2,3
//! 4,5,6
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;
use rayon::prelude::*;

use crate::config::CSV_EXTENSION;

mod error;
pub mod markers;

pub use error::ConvertError;
pub use markers::{AmbiguousMarker, MarkerMatch, ATTRIBUTE_CHAR, INPUTS_MARKER, OUTPUTS_MARKER};


/// Transform dataset lines into CSV lines
///
/// Fails only when `@inputs` or `@outputs` is ambiguous. A missing marker
/// simply suppresses the header.
pub fn convert_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<String>, AmbiguousMarker> {
    let inputs = markers::single_marker(lines, INPUTS_MARKER)?;
    let outputs = markers::single_marker(lines, OUTPUTS_MARKER)?;

    let mut result = Vec::with_capacity(lines.len() + 1);
    if let (Some(inputs), Some(outputs)) = (inputs, outputs) {
        result.push(format!("{}, {}", inputs, outputs));
    }

    for line in lines {
        let line: &str = line.as_ref();
        if !line.contains(ATTRIBUTE_CHAR) {
            result.push(line.to_string());
        }
    }

    Ok(result)
}

/// Split text into lines on `\n`, `\r\n` or a lone `\r`
///
/// A trailing line terminator does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                lines.push(&rest[..pos]);
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Sibling `.csv` path for a dataset file
pub fn csv_path_for(dat_path: &Path) -> PathBuf {
    dat_path.with_extension(CSV_EXTENSION)
}

/// Convert one dataset file, writing (or overwriting) its sibling `.csv`
///
/// Returns the path of the written file.
pub fn convert_file(dat_path: &Path) -> Result<PathBuf, ConvertError> {
    let bytes = fs::read(dat_path).map_err(|source| ConvertError::Read {
        path: dat_path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let lines = split_lines(&text);

    let output = convert_lines(&lines).map_err(|source| ConvertError::AmbiguousMarker {
        path: dat_path.to_path_buf(),
        source,
    })?;

    let csv_path = csv_path_for(dat_path);
    write_lines(&csv_path, &output).map_err(|source| ConvertError::Write {
        path: csv_path.clone(),
        source,
    })?;

    debug!(
        "Converted {} ({} lines) to {}",
        dat_path.display(),
        output.len(),
        csv_path.display()
    );
    Ok(csv_path)
}

/// Convert every file concurrently on the current rayon pool
pub fn convert_all(files: &[PathBuf]) -> Vec<(PathBuf, Result<PathBuf, ConvertError>)> {
    files
        .par_iter()
        .map(|file| (file.clone(), convert_file(file)))
        .collect()
}

fn write_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
