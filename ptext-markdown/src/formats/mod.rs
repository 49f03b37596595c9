//! Format implementations
//!
//! This module contains the format implementations that convert between the
//! Portable Text block model and text representations.

pub mod markdown;
pub mod portable_text;

pub use markdown::MarkdownFormat;
pub use portable_text::PortableTextFormat;
