//! Golden sample tests: every `fixtures/<name>.json` must render to `<name>.json.md`.
//!
//! Each sample is decoded twice, from the raw string and from an already parsed JSON
//! value, and both must produce the same Markdown.

use crate::common::{golden_pairs, render_blocks, render_json};
use ptext_markdown::{blocks_from_value, parse_reader};

#[test]
fn test_samples_render_to_golden_markdown() {
    let pairs = golden_pairs();
    assert!(!pairs.is_empty(), "no fixtures found");

    for pair in pairs {
        let from_str = render_json(&pair.source);
        assert_eq!(
            from_str, pair.expected,
            "input: {}\nexpected:\n{}\ngot:\n{}",
            pair.name, pair.expected, from_str
        );

        let value: serde_json::Value = serde_json::from_str(&pair.source).unwrap();
        let from_value = render_blocks(&blocks_from_value(value).unwrap());
        assert_eq!(from_value, pair.expected, "value input: {}", pair.name);

        let from_reader = render_blocks(&parse_reader(pair.source.as_bytes()).unwrap());
        assert_eq!(from_reader, pair.expected, "reader input: {}", pair.name);
    }
}

#[test]
fn test_samples_end_with_single_newline() {
    for pair in golden_pairs() {
        let output = render_json(&pair.source);
        assert!(output.ends_with('\n'), "{}", pair.name);
        assert!(!output.ends_with("\n\n"), "{}", pair.name);
    }
}
