//! The `Format` trait implemented by every document format.

use crate::error::FormatError;
use crate::model::{Block, Blocks};
use std::collections::HashMap;

/// A document format that can decode into blocks, render blocks, or both.
///
/// Both directions default to [`FormatError::NotSupported`]; a format overrides the
/// ones it handles.
pub trait Format: Send + Sync {
    /// Registry name, as given to `--from` and `--to`.
    fn name(&self) -> &str;

    /// One-line summary for format listings.
    fn description(&self) -> &str {
        ""
    }

    /// File extensions, without the dot, that select this format.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn parse(&self, _source: &str) -> Result<Blocks, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    fn serialize(&self, _blocks: &[Block]) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Render with extra string parameters. Formats without tunable output accept only
    /// an empty parameter map.
    fn serialize_with_options(
        &self,
        blocks: &[Block],
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        match params.keys().next() {
            None => self.serialize(blocks),
            Some(key) => Err(FormatError::NotSupported(format!(
                "Format '{}' takes no parameters, got '{key}'",
                self.name()
            ))),
        }
    }
}
