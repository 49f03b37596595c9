//! Format-agnostic reconstruction of nested structure from the flat block model.

pub mod lists;
pub mod marks;
