//! Markdown format tests
//!
//! Tests for Portable Text → Markdown export.

mod export;
mod samples;
mod structure;
