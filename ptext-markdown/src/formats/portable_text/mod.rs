//! Portable Text JSON format
//!
//! Decodes the JSON wire format into the typed block model and serializes it back. A
//! document is either an array of blocks or a single block object. Objects with
//! `_type: "block"` become text blocks; every other object is kept verbatim as a custom
//! block.

use std::io::Read;

use serde_json::Value;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Block, Blocks};

/// Parse a Portable Text document from a JSON string.
pub fn parse_blocks(source: &str) -> Result<Blocks, FormatError> {
    let value: Value = serde_json::from_str(source)?;
    blocks_from_value(value)
}

/// Parse a Portable Text document from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Blocks, FormatError> {
    let value: Value = serde_json::from_reader(reader)?;
    blocks_from_value(value)
}

/// Decode an already parsed JSON value.
pub fn blocks_from_value(value: Value) -> Result<Blocks, FormatError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| decode_block(index, item))
            .collect(),
        Value::Object(_) => Ok(vec![decode_block(0, value)?]),
        other => Err(FormatError::ParseError(format!(
            "expected a block or an array of blocks, found {}",
            json_kind(&other)
        ))),
    }
}

fn decode_block(index: usize, value: Value) -> Result<Block, FormatError> {
    if !value.is_object() {
        return Err(FormatError::ParseError(format!(
            "block {index}: expected an object, found {}",
            json_kind(&value)
        )));
    }
    Block::from_value(value)
        .map_err(|err| FormatError::ParseError(format!("block {index}: {err}")))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize blocks to pretty-printed Portable Text JSON.
pub fn to_json(blocks: &[Block]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(blocks)
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}

/// Format implementation for Portable Text JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct PortableTextFormat;

impl Format for PortableTextFormat {
    fn name(&self) -> &str {
        "portable-text"
    }

    fn description(&self) -> &str {
        "Portable Text JSON block content"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "portabletext"]
    }

    fn parse(&self, source: &str) -> Result<Blocks, FormatError> {
        parse_blocks(source)
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        to_json(blocks)
    }
}
