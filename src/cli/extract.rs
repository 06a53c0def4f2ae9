//! Extract command implementation
//!
//! Streams input through [`JsonObjectStream`] and prints one object per line.

use crate::utils::json_extract::JsonObjectStream;
use std::io::{self, BufRead, Write};

/// Counts reported after an extract run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    /// Balanced regions found
    pub objects: usize,
    /// Regions that failed to decode (only counted with `--validate`)
    pub invalid: usize,
    /// Bytes of an object left open at end of input
    pub truncated: Option<usize>,
}

/// Run the extractor over `input`, writing each region to `out`.
///
/// Regions are written verbatim, one per line. With `validate`, regions
/// that are not valid JSON are prefixed with `# invalid: `.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    validate: bool,
) -> io::Result<ExtractSummary> {
    let mut stream = JsonObjectStream::new();
    let mut summary = ExtractSummary::default();
    let mut line = String::new();

    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        for object in stream.push(&line) {
            write_object(out, &object, validate, &mut summary)?;
        }
    }

    summary.truncated = stream.finish().map(|rest| rest.len());
    Ok(summary)
}

fn write_object<W: Write>(
    out: &mut W,
    object: &str,
    validate: bool,
    summary: &mut ExtractSummary,
) -> io::Result<()> {
    summary.objects += 1;

    if validate && serde_json::from_str::<serde::de::IgnoredAny>(object).is_err() {
        summary.invalid += 1;
        writeln!(out, "# invalid: {}", object)
    } else {
        writeln!(out, "{}", object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(input: &str, validate: bool) -> (String, ExtractSummary) {
        let mut out = Vec::new();
        let summary = run(input.as_bytes(), &mut out, validate).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_objects_across_lines() {
        let (out, summary) = extract("first {\"a\":\n 1} then {\"b\": 2}\n", false);
        assert_eq!(out, "{\"a\":\n 1}\n{\"b\": 2}\n");
        assert_eq!(summary.objects, 2);
        assert_eq!(summary.truncated, None);
    }

    #[test]
    fn test_validate_marks_invalid_regions() {
        let (out, summary) = extract("{\"ok\": true} {not json}", true);
        assert_eq!(out, "{\"ok\": true}\n# invalid: {not json}\n");
        assert_eq!(summary.invalid, 1);
    }

    #[test]
    fn test_reports_truncated_tail() {
        let (out, summary) = extract("{\"a\": 1} {\"b\": ", false);
        assert_eq!(out, "{\"a\": 1}\n");
        assert_eq!(summary.truncated, Some("{\"b\": ".len()));
    }

    #[test]
    fn test_empty_input() {
        let (out, summary) = extract("", true);
        assert!(out.is_empty());
        assert_eq!(summary, ExtractSummary::default());
    }
}
