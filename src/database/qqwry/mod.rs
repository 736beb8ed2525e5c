//! QQwry database format
//!
//! QQwry ("纯真") is a compact IPv4 database: an 8-byte header, a record
//! area holding end IPs and GBK country/area text, and a sorted index of
//! 7-byte entries at the end of the file. All integers are little-endian.
//!
//! # Module Organization
//!
//! - `header`: header parsing and validation
//! - `index`: binary search over the index
//! - `reader`: location record decoding
//! - `utils`: byte helpers

mod header;
mod index;
pub(crate) mod reader;
pub(crate) mod utils;

pub use header::{INDEX_RECORD_LEN, QQwryHeader};
pub use index::IndexSearcher;
pub use reader::{REDIRECT_MODE_1, REDIRECT_MODE_2, RecordResolver};
