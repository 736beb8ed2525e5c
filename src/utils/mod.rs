//! Shared helpers: text decoding and filesystem locations

pub mod encoding;
pub mod path;
