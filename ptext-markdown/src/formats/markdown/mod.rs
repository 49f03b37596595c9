//! Markdown format implementation
//!
//! Export only: Portable Text blocks are rendered to CommonMark (plus `~~` strike-through
//! and `<u>` underline, which most renderers accept).
//!
//! # Element Mapping Table
//!
//! | Portable Text          | Markdown                    | Notes                                   |
//! |------------------------|-----------------------------|-----------------------------------------|
//! | block, style `normal`  | Paragraph                   | Blank line between blocks               |
//! | block, style `hN`      | Heading (`#`..`######`)     | Newlines in the text become spaces      |
//! | block, `blockquote`    | Block quote                 | `> ` on every line                      |
//! | block with `listItem`  | List item (`-` / `1.`)      | Nesting rebuilt from `level`            |
//! | custom block           | Handler output              | Nothing without a handler               |
//! | Marks:                 |                             |                                         |
//! |   strong / em          | `**` / `_`                  |                                         |
//! |   strike-through       | `~~`                        |                                         |
//! |   underline            | `<u>` ... `</u>`            | Raw HTML                                |
//! |   code                 | Code span                   | Fence grows past inner backtick runs    |
//! |   link                 | `[text](href)`              | Outermost mark                          |
//! |   other annotations    | Plain text                  | Annotation data is dropped              |
//!
//! # Architecture Notes
//!
//! Portable Text is flat twice over: spans carry unordered mark sets instead of nested
//! inline elements, and lists are runs of leveled blocks instead of containers. Both are
//! rebuilt by the format-agnostic code in `crate::common` (`marks` and `lists`), which
//! keeps this module down to delimiters, prefixes and line layout.
//!
//! # Lossy Conversions
//!
//! - Annotations other than links lose their data
//! - Unrecognized block styles render as paragraphs
//! - List types other than `number` render as bullets
//! - Empty text blocks are dropped

pub mod block;
pub mod escape;
pub mod options;
pub mod writer;

use std::collections::HashMap;
use std::io::{self, Write};

use crate::error::{FormatError, RenderError};
use crate::format::Format;
use crate::model::Block;

pub use options::{CustomBlockHandler, MarkdownOptions};
pub use writer::MarkdownWriter;

/// Render `blocks` as Markdown into `out`.
pub fn to_markdown<W: Write>(
    blocks: &[Block],
    out: W,
    options: &MarkdownOptions,
) -> Result<(), RenderError> {
    MarkdownWriter::new(out, options).write_blocks(blocks)?;
    Ok(())
}

/// Render `blocks` as a Markdown string.
pub fn to_markdown_string(blocks: &[Block], options: &MarkdownOptions) -> Result<String, RenderError> {
    let buffer = MarkdownWriter::new(Vec::new(), options).write_blocks(blocks)?;
    String::from_utf8(buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err).into())
}

/// Format implementation for Markdown
#[derive(Debug, Default, Clone)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownFormat { options }
    }

}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        Ok(to_markdown_string(blocks, &self.options)?)
    }

    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut effective = self.options.clone();
        effective.apply_params(options)?;
        Ok(to_markdown_string(blocks, &effective)?)
    }
}
