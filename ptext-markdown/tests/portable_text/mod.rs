//! Portable Text JSON format tests

mod decode;
