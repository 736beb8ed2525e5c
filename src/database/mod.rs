//! Database module for qqwry-seek
//!
//! This module provides the lookup engine over a QQwry-format database.
//!
//! # Module Organization
//!
//! - `source`: absolute-offset byte access (memory, file, mmap)
//! - `qqwry`: header, index search and record decoding
//! - `location`: resolved location value and sentinel strings
//! - `cache`: memo of resolved lookups
//! - `service`: the public lookup façade

pub mod cache;
pub mod location;
pub mod qqwry;
pub mod service;
pub mod source;

#[cfg(test)]
pub(crate) mod testutil;

pub use cache::LookupCache;
pub use location::{INVALID_DATABASE, Location, PLACEHOLDER, UNKNOWN_AREA, UNKNOWN_COUNTRY};
pub use qqwry::{IndexSearcher, QQwryHeader, RecordResolver};
pub use service::{GeoLookupService, IpQuery, parse_dotted};
pub use source::{ByteSource, FileSource, MemorySource, MmapSource};
