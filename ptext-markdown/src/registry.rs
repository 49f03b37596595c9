//! Lookup of formats by name and by file extension.

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::portable_text::PortableTextFormat;
use crate::model::{Block, Blocks};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

/// Named formats available for conversion.
///
/// The default registry holds `portable-text` (decode and re-encode) and `markdown`
/// (render only).
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    pub fn empty() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Add `format`, replacing any format registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        match self.formats.get(name) {
            Some(format) => Ok(format.as_ref()),
            None => Err(FormatError::FormatNotFound(name.to_string())),
        }
    }

    /// Registered names in sorted order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Name of the first format claiming the extension of `filename`.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename).extension()?.to_str()?;
        self.formats
            .iter()
            .find(|(_, format)| format.file_extensions().contains(&extension))
            .map(|(name, _)| name.clone())
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Blocks, FormatError> {
        self.get(format)?.parse(source)
    }

    pub fn serialize_with_options(
        &self,
        blocks: &[Block],
        format: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.get(format)?.serialize_with_options(blocks, params)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(PortableTextFormat);
        registry.register(MarkdownFormat::default());
        registry
    }
}
