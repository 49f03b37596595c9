//! Portable Text to Markdown conversion
//!
//! ```text
//!     This crate renders Portable Text block content (the JSON rich-text model used by
//!     Sanity and others) as CommonMark Markdown, and exposes the conversion through the
//!     same Format / FormatRegistry interface for every supported format.
//!
//!     This is a pure lib, that is, it powers ptext-cli but is shell agnostic: no code
//!     should be written that supposes a shell environment, be it std print, env vars etc.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── model.rs                # Typed block model (serde)
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── ir                      # Inline event stream
//!     ├── common                  # Mark stack and list reconstruction
//!     ├── formats
//!     │   ├── portable_text       # JSON decoding and encoding
//!     │   └── markdown            # Escaping, block renderer, document writer
//!     └── lib.rs
//! ```
//!
//! Testing
//! ```text
//!     tests
//!     ├── <format>
//!     │   └── <testname>.rs
//!     └── fixtures
//!         ├── <docname>.json
//!         └── <docname>.json.md
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included from tests/lib.rs.
//! ```
//!
//! Core Algorithms
//!
//! ```text
//!     Portable Text is flat where Markdown is nested: spans carry unordered mark sets,
//!     and lists are runs of blocks tagged with a level. Two stack algorithms rebuild the
//!     nesting (see ./common/marks.rs and ./common/lists.rs), so the Markdown code only
//!     maps well-bracketed events and list contexts to syntax.
//! ```
//!
//! Quick use
//!
//! ```ignore
//! let blocks = ptext_markdown::parse_blocks(json)?;
//! let markdown = ptext_markdown::to_markdown_string(&blocks, &MarkdownOptions::default())?;
//! ```

pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;

pub mod common;
pub mod ir;

pub use error::{FormatError, RenderError};
pub use format::Format;
pub use formats::markdown::{
    to_markdown, to_markdown_string, CustomBlockHandler, MarkdownFormat, MarkdownOptions,
    MarkdownWriter,
};
pub use formats::portable_text::{blocks_from_value, parse_blocks, parse_reader, PortableTextFormat};
pub use model::{Block, Blocks, CustomBlock, ListKind, MarkDef, Span, Style, TextBlock};
pub use registry::FormatRegistry;
