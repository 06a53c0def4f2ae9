//! Balanced JSON object extraction from free-form text
//!
//! Model output streamed over the wire often mixes prose with one or more
//! JSON objects, and the last object may still be arriving. The functions in
//! this module locate the complete top-level `{...}` regions in such text
//! without parsing them; decoding is left to `serde_json` afterwards.
//!
//! Depth is tracked only for `{` and `}`. Braces inside double-quoted
//! strings are ignored, and a backslash inside a string always consumes the
//! following character.
//!
//! # Example
//!
//! ```
//! use mcptools::utils::json_extract::extract_json_objects;
//!
//! let text = r#"thinking... {"tool": "get_time"} then {"tool": "get_weather", "args": {"city": "长沙"}}"#;
//! let objects = extract_json_objects(text);
//! assert_eq!(objects.len(), 2);
//! assert_eq!(objects[0], r#"{"tool": "get_time"}"#);
//! ```

use serde::de::DeserializeOwned;
use tracing::debug;

/// Scanner position relative to JSON string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
    Escaped,
}

/// Result of scanning a buffer for balanced objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonScan<'a> {
    /// Complete objects in order of appearance
    pub objects: Vec<&'a str>,
    /// Byte offset up to which the input needs no further scanning.
    ///
    /// Equals the input length unless the buffer ends inside a truncated
    /// object, in which case it is the offset of that object's opening brace.
    pub consumed: usize,
}

/// Extract every complete top-level `{...}` region from `text`.
///
/// Nested objects are returned as part of their enclosing object. Scanning
/// stops at the first object that is still open when the input ends; that
/// candidate is dropped and nothing after it is examined.
pub fn extract_json_objects(text: &str) -> Vec<&str> {
    scan_json_objects(text).objects
}

/// Like [`extract_json_objects`], also reporting how much input was consumed.
pub fn scan_json_objects(text: &str) -> JsonScan<'_> {
    let bytes = text.as_bytes();
    let mut objects = Vec::new();
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let start = cursor + offset;
        match balanced_len(&bytes[start..]) {
            Some(len) => {
                objects.push(&text[start..start + len]);
                cursor = start + len;
            }
            None => {
                return JsonScan {
                    objects,
                    consumed: start,
                };
            }
        }
    }

    JsonScan {
        objects,
        consumed: text.len(),
    }
}

/// Brace depth plus string state, advanced one byte at a time
#[derive(Debug, Clone, Copy)]
struct BraceScanner {
    depth: usize,
    state: ScanState,
}

impl Default for BraceScanner {
    fn default() -> Self {
        Self {
            depth: 0,
            state: ScanState::Normal,
        }
    }
}

impl BraceScanner {
    fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// Advance over `byte`. Returns `true` when it closes the outermost
    /// object. Must only see a `}` in normal state while an object is open.
    fn feed(&mut self, byte: u8) -> bool {
        self.state = match (self.state, byte) {
            (ScanState::Escaped, _) => ScanState::InString,
            (ScanState::InString, b'\\') => ScanState::Escaped,
            (ScanState::InString, b'"') => ScanState::Normal,
            (ScanState::InString, _) => ScanState::InString,
            (ScanState::Normal, b'"') => ScanState::InString,
            (ScanState::Normal, b'{') => {
                self.depth += 1;
                ScanState::Normal
            }
            (ScanState::Normal, b'}') => {
                self.depth -= 1;
                return self.depth == 0;
            }
            (ScanState::Normal, _) => ScanState::Normal,
        };
        false
    }
}

/// Length of the balanced region at the head of `bytes`, which must start
/// with `{`. Returns `None` when the input ends before the region closes.
///
/// Works on bytes: every delimiter is ASCII, and UTF-8 continuation bytes
/// never collide with ASCII, so the returned length is a char boundary.
fn balanced_len(bytes: &[u8]) -> Option<usize> {
    let mut scanner = BraceScanner::default();
    bytes
        .iter()
        .position(|&byte| scanner.feed(byte))
        .map(|i| i + 1)
}

/// Extract and decode every object in `text`, skipping regions that are
/// balanced but not valid JSON for `T`.
pub fn parse_json_objects<T: DeserializeOwned>(text: &str) -> Vec<T> {
    extract_json_objects(text)
        .into_iter()
        .filter_map(|raw| match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(error = %e, len = raw.len(), "Skipping undecodable JSON region");
                None
            }
        })
        .collect()
}

/// Incremental extractor for text that arrives in chunks
///
/// Only the object that is still open is buffered, together with the scanner
/// state reached at the end of the buffer, so each pushed byte is scanned
/// once. Text outside objects is discarded as it is passed over.
#[derive(Debug, Default)]
pub struct JsonObjectStream {
    /// Empty, or the open object starting with its `{`
    buffer: String,
    scanner: BraceScanner,
}

impl JsonObjectStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the objects it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        let resume = self.buffer.len();
        self.buffer.push_str(chunk);

        let mut objects = Vec::new();
        let bytes = self.buffer.as_bytes();
        let mut start = 0;
        let mut i = resume;

        while i < bytes.len() {
            if !self.scanner.is_open() {
                match bytes[i..].iter().position(|&b| b == b'{') {
                    Some(offset) => {
                        start = i + offset;
                        i = start;
                    }
                    None => break,
                }
            }
            if self.scanner.feed(bytes[i]) {
                objects.push(self.buffer[start..=i].to_string());
            }
            i += 1;
        }

        let keep_from = if self.scanner.is_open() {
            start
        } else {
            bytes.len()
        };
        self.buffer.drain(..keep_from);
        objects
    }

    /// Text held back because it belongs to an object that is still open
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// End the stream, returning the truncated object that was never closed.
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[rstest]
    #[case("", &[])]
    #[case("plain text without objects", &[])]
    #[case("closing only }}}", &[])]
    #[case("{}", &["{}"])]
    #[case(r#"{"a": {"b": 1}}"#, &[r#"{"a": {"b": 1}}"#])]
    #[case(r#"{"a":1}{"b":2}"#, &[r#"{"a":1}"#, r#"{"b":2}"#])]
    #[case(r#"{"a": "x}y"}"#, &[r#"{"a": "x}y"}"#])]
    #[case(r#"{"a": "{{{"}"#, &[r#"{"a": "{{{"}"#])]
    #[case(r#"prefix {"a": 1"#, &[])]
    #[case(r#"say {"a": 1} and {"b": [1, 2]} done"#, &[r#"{"a": 1}"#, r#"{"b": [1, 2]}"#])]
    fn test_extract_cases(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(extract_json_objects(input), expected);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let input = r#"{"a": "say \"}\" now"} tail"#;
        assert_eq!(extract_json_objects(input), vec![r#"{"a": "say \"}\" now"}"#]);
    }

    #[test]
    fn test_escaped_backslash_before_closing_quote() {
        // The string value is a single backslash; the quote after it closes the string.
        let input = r#"{"path": "C:\\"}{"next": true}"#;
        assert_eq!(
            extract_json_objects(input),
            vec![r#"{"path": "C:\\"}"#, r#"{"next": true}"#]
        );
    }

    #[test]
    fn test_truncated_object_stops_scan() {
        let input = r#"{"ok": 1} {"open": {"x": 2} {"after": 3}"#;
        let scan = scan_json_objects(input);
        assert_eq!(scan.objects, vec![r#"{"ok": 1}"#]);
        assert_eq!(scan.consumed, input.find(r#"{"open""#).unwrap());
    }

    #[test]
    fn test_consumed_covers_trailing_text() {
        let input = r#"{"a": 1} trailing words"#;
        let scan = scan_json_objects(input);
        assert_eq!(scan.objects.len(), 1);
        assert_eq!(scan.consumed, input.len());
    }

    #[test]
    fn test_multibyte_text_around_objects() {
        let input = "城市：{\"city\": \"长沙\"}，温度：{\"temp\": \"25°C\"}";
        assert_eq!(
            extract_json_objects(input),
            vec!["{\"city\": \"长沙\"}", "{\"temp\": \"25°C\"}"]
        );
    }

    #[test]
    fn test_balanced_but_invalid_json_is_returned() {
        assert_eq!(extract_json_objects("{,}"), vec!["{,}"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let input = r#"a {"x": {"y": "}"}} b {"z": [1, {"w": null}]} c"#;
        for object in extract_json_objects(input) {
            assert_eq!(extract_json_objects(object), vec![object]);
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Call {
        name: String,
    }

    #[test]
    fn test_parse_skips_invalid_regions() {
        let input = r#"{"name": "get_time"} {not json} {"name": "web_search"} {"other": 1}"#;
        let calls: Vec<Call> = parse_json_objects(input);
        assert_eq!(
            calls,
            vec![
                Call {
                    name: "get_time".to_string()
                },
                Call {
                    name: "web_search".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_stream_emits_objects_across_chunks() {
        let mut stream = JsonObjectStream::new();

        assert!(stream.push(r#"intro {"a": "x"#).is_empty());
        assert_eq!(stream.pending(), r#"{"a": "x"#);

        assert_eq!(stream.push(r#"}y"} {"b": 2}"#), vec![r#"{"a": "x}y"}"#, r#"{"b": 2}"#]);
        assert_eq!(stream.pending(), "");

        assert!(stream.push(r#" {"c": "#).is_empty());
        assert_eq!(stream.finish().as_deref(), Some(r#"{"c": "#));
    }

    #[test]
    fn test_stream_escape_split_across_chunks() {
        let mut stream = JsonObjectStream::new();
        assert!(stream.push(r#"{"q": "a\"#).is_empty());
        assert!(stream.push(r#""}"#).is_empty());
        assert_eq!(stream.push(r#""}"#), vec![r#"{"q": "a\"}"}"#]);
        assert!(stream.finish().is_none());
    }

    #[test]
    fn test_stream_keeps_scanner_state_between_pushes() {
        let mut stream = JsonObjectStream::new();
        assert!(stream.push(r#"x {"a": {"b": "}"#).is_empty());
        assert_eq!(stream.scanner.depth, 2);
        assert_eq!(stream.scanner.state, ScanState::InString);
        assert_eq!(stream.pending(), r#"{"a": {"b": "}"#);

        assert_eq!(stream.push(r#""}} y"#), vec![r#"{"a": {"b": "}"}}"#]);
        assert_eq!(stream.scanner.depth, 0);
        assert!(stream.pending().is_empty());
    }

    #[test]
    fn test_stream_long_object_fed_bytewise() {
        let object = format!(r#"{{"data": "{}", "n": {{"m": 1}}}}"#, "}{".repeat(5_000));
        let text = format!("lead {} tail {{\"open\": ", object);

        let mut stream = JsonObjectStream::new();
        let mut emitted = Vec::new();
        for ch in text.chars() {
            emitted.extend(stream.push(ch.encode_utf8(&mut [0; 4])));
        }

        assert_eq!(emitted, vec![object]);
        assert_eq!(stream.finish().as_deref(), Some(r#"{"open": "#));
    }
}
