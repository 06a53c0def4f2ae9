//! Behavioural tests for balanced JSON object extraction

use mcptools::utils::json_extract::{
    JsonObjectStream, extract_json_objects, parse_json_objects, scan_json_objects,
};
use rstest::rstest;
use serde::Deserialize;
use serde_json::Value;

#[rstest]
#[case::no_braces("plain prose, nothing to see", &[])]
#[case::empty_input("", &[])]
#[case::empty_object("{}", &["{}"])]
#[case::nested(r#"{"a": {"b": 1}}"#, &[r#"{"a": {"b": 1}}"#])]
#[case::adjacent(r#"{"a":1}{"b":2}"#, &[r#"{"a":1}"#, r#"{"b":2}"#])]
#[case::quoted_brace(r#"{"a": "x}y"}"#, &[r#"{"a": "x}y"}"#])]
#[case::truncated(r#"prefix {"a": 1"#, &[])]
#[case::prose_between(
    r#"I will call {"name": "get_time"} and then {"name": "get_weather"}."#,
    &[r#"{"name": "get_time"}"#, r#"{"name": "get_weather"}"#]
)]
#[case::stray_closing_brace(r#"} oops {"ok": true}"#, &[r#"{"ok": true}"#])]
fn test_extraction_cases(#[case] input: &str, #[case] expected: &[&str]) {
    assert_eq!(extract_json_objects(input), expected);
}

#[test]
fn test_results_are_substrings_in_order() {
    let text = r#"a {"x": [1, {"y": 2}]} b {"z": "\"}"} c"#;
    let objects = extract_json_objects(text);

    let mut from = 0;
    for object in &objects {
        let at = text[from..].find(object).expect("result must be a substring") + from;
        assert!(object.starts_with('{') && object.ends_with('}'));
        from = at + object.len();
    }
    assert_eq!(objects.len(), 2);
}

#[test]
fn test_idempotent_on_results() {
    let text = r#"Reply: {"tool": "web_search", "arguments": {"query": "深圳 天气"}} done"#;
    for object in extract_json_objects(text) {
        assert_eq!(extract_json_objects(object), vec![object]);
    }
}

#[test]
fn test_extracted_objects_decode() {
    let text = r#"{"a": "brace } and quote \" inside"} trailing {"b": [1, 2, 3]}"#;
    for object in extract_json_objects(text) {
        serde_json::from_str::<Value>(object).expect("balanced region should decode");
    }
}

#[test]
fn test_scan_stops_at_truncated_object() {
    let text = r#"{"a": 1} {"b": "unterminated} {"c": 3}"#;
    let scan = scan_json_objects(text);

    assert_eq!(scan.objects, vec![r#"{"a": 1}"#]);
    assert_eq!(&text[scan.consumed..], r#"{"b": "unterminated} {"c": 3}"#);
}

#[derive(Debug, Deserialize, PartialEq)]
struct ToolCall {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[test]
fn test_parse_tool_calls_from_reply() {
    let reply = r#"Let me check. {"name": "get_weather", "arguments": {"city": "长沙"}}
        Also {"thought": "not a tool call"} and {"name": "get_time"}"#;

    let calls: Vec<ToolCall> = parse_json_objects(reply);
    let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["get_weather", "get_time"]);
    assert_eq!(calls[0].arguments["city"], "长沙");
}

#[test]
fn test_stream_matches_whole_text_extraction() {
    let text = r#"x {"a": {"b": "}{"}} y {"c": "\\"} z {"d": 4}"#;
    let expected: Vec<String> = extract_json_objects(text)
        .into_iter()
        .map(String::from)
        .collect();

    for chunk_size in 1..=7 {
        let mut stream = JsonObjectStream::new();
        let mut collected = Vec::new();
        let bytes: Vec<char> = text.chars().collect();
        for chunk in bytes.chunks(chunk_size) {
            let chunk: String = chunk.iter().collect();
            collected.extend(stream.push(&chunk));
        }
        assert_eq!(collected, expected, "chunk size {}", chunk_size);
        assert!(stream.finish().is_none());
    }
}

#[test]
fn test_stream_keeps_open_object_pending() {
    let mut stream = JsonObjectStream::new();

    assert!(stream.push(r#"thinking {"name": "get_"#).is_empty());
    assert_eq!(stream.pending(), r#"{"name": "get_"#);

    let done = stream.push(r#"time"} more"#);
    assert_eq!(done, vec![r#"{"name": "get_time"}"#.to_string()]);
    assert!(stream.pending().is_empty());
}
