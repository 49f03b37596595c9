//! Inspection transforms for Portable Text documents
//!
//! Each transform decodes the JSON source and dumps one internal view of it:
//!
//! - `events`: the inline event stream the mark resolver produces for every text block
//! - `blocks-json`: the decoded block model, re-serialized as pretty JSON
//! - `lists`: the list context the reconstructor assigns to every block

use ptext_markdown::common::lists::{list_contexts, ListContext, ListMarker};
use ptext_markdown::common::marks::resolve_marks;
use ptext_markdown::formats::portable_text::to_json;
use ptext_markdown::{parse_blocks, Block};
use std::collections::HashMap;
use std::fmt::Write;

/// All transforms accepted by `ptext inspect`
pub const AVAILABLE_TRANSFORMS: &[&str] = &["events", "blocks-json", "lists"];

/// Transform used when none is given on the command line
pub const DEFAULT_TRANSFORM: &str = "events";

/// Execute a named transform on a Portable Text source
///
/// # Extra Parameters
///
/// - `show-keys`: "true" / "false" - Print each block's `_key` in block headers
///   (defaults to true)
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let blocks = parse_blocks(source).map_err(|e| format!("Parse error: {e}"))?;
    let show_keys = extra_params
        .get("show-keys")
        .map(|value| value != "false")
        .unwrap_or(true);

    match transform_name {
        "events" => events(&blocks, show_keys),
        "blocks-json" => to_json(&blocks).map_err(|e| format!("JSON serialization failed: {e}")),
        "lists" => Ok(lists(&blocks, show_keys)),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn header(index: usize, block: &Block, show_keys: bool) -> String {
    if show_keys && !block.key().is_empty() {
        format!("#{index} {} [{}]", block.block_type(), block.key())
    } else {
        format!("#{index} {}", block.block_type())
    }
}

fn events(blocks: &[Block], show_keys: bool) -> Result<String, String> {
    let mut out = String::new();
    for (index, block) in blocks.iter().enumerate() {
        let _ = writeln!(out, "{}", header(index, block, show_keys));
        match block {
            Block::Text(text) => {
                let events = resolve_marks(text).map_err(|e| format!("Transform failed: {e}"))?;
                for event in events {
                    let _ = writeln!(out, "  {event}");
                }
            }
            Block::Custom(_) => out.push_str("  (custom block)\n"),
        }
    }
    Ok(out)
}

fn describe(context: Option<ListContext>) -> String {
    match context {
        None => "-".to_string(),
        Some(ListContext {
            depth,
            marker: ListMarker::Bullet,
        }) => format!("depth {depth}, bullet"),
        Some(ListContext {
            depth,
            marker: ListMarker::Number(number),
        }) => format!("depth {depth}, number {number}"),
    }
}

fn lists(blocks: &[Block], show_keys: bool) -> String {
    let mut out = String::new();
    for (index, (block, context)) in blocks.iter().zip(list_contexts(blocks)).enumerate() {
        let _ = writeln!(out, "{}: {}", header(index, block, show_keys), describe(context));
    }
    out
}
