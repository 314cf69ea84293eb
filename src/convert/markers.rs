//! Header marker lookup.
//!
//! `@inputs` and `@outputs` may each appear on at most one line. The lookup
//! keeps "absent", "found once" and "found several times" apart so that an
//! ambiguous file is never silently resolved by picking one of the lines.

/// Character that starts (or appears in) every attribute declaration line
pub const ATTRIBUTE_CHAR: char = '@';

/// Marker of the line listing input attribute names
pub const INPUTS_MARKER: &str = "@inputs";

/// Marker of the line listing output attribute names
pub const OUTPUTS_MARKER: &str = "@outputs";

/// Result of searching a dataset for one marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerMatch {
    /// No line contains the marker
    Absent,
    /// Exactly one line matched; holds its text with the marker removed and trimmed
    Found(String),
    /// The marker matched this many lines (always at least 2)
    Ambiguous(usize),
}

/// A marker matched more than one line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("marker '{marker}' appears on {count} lines, expected at most one")]
pub struct AmbiguousMarker {
    /// The offending marker
    pub marker: &'static str,
    /// Number of matching lines
    pub count: usize,
}

/// Search `lines` for the single line containing `marker`
pub fn find_marker<S: AsRef<str>>(lines: &[S], marker: &str) -> MarkerMatch {
    let mut first: Option<&str> = None;
    let mut count = 0;
    for line in lines {
        let line: &str = line.as_ref();
        if line.contains(marker) {
            count += 1;
            first.get_or_insert(line);
        }
    }

    match (first, count) {
        (None, _) => MarkerMatch::Absent,
        (Some(line), 1) => MarkerMatch::Found(line.replace(marker, "").trim().to_string()),
        (Some(_), count) => MarkerMatch::Ambiguous(count),
    }
}

/// Like [`find_marker`], but turns the ambiguous case into an error
pub fn single_marker<S: AsRef<str>>(
    lines: &[S],
    marker: &'static str,
) -> Result<Option<String>, AmbiguousMarker> {
    match find_marker(lines, marker) {
        MarkerMatch::Absent => Ok(None),
        MarkerMatch::Found(text) => Ok(Some(text)),
        MarkerMatch::Ambiguous(count) => Err(AmbiguousMarker { marker, count }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent() {
        let lines = ["@relation x", "1,2"];
        assert_eq!(find_marker(&lines, INPUTS_MARKER), MarkerMatch::Absent);
    }

    #[test]
    fn test_found_is_trimmed() {
        let lines = ["@relation x", "  @inputs  Sex, Length ", "1,2"];
        assert_eq!(
            find_marker(&lines, INPUTS_MARKER),
            MarkerMatch::Found("Sex, Length".to_string())
        );
    }

    #[test]
    fn test_ambiguous_counts_every_match() {
        let lines = ["@inputs a", "@inputs b", "x @inputs c"];
        assert_eq!(find_marker(&lines, INPUTS_MARKER), MarkerMatch::Ambiguous(3));

        let err = single_marker(&lines, INPUTS_MARKER).unwrap_err();
        assert_eq!(err.marker, "@inputs");
        assert_eq!(err.count, 3);
    }

    #[test]
    fn test_inputs_and_outputs_are_distinct() {
        let lines = ["@inputs a", "@outputs b"];
        assert_eq!(single_marker(&lines, INPUTS_MARKER).unwrap().as_deref(), Some("a"));
        assert_eq!(single_marker(&lines, OUTPUTS_MARKER).unwrap().as_deref(), Some("b"));
    }
}
