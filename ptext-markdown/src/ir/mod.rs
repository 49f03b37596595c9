//! Intermediate representation shared by the resolvers and the Markdown writer.
//!
//! The resolvers in [`crate::common`] turn the flat Portable Text model into these
//! properly nested events, so the format code only has to map events to syntax.

pub mod events;
