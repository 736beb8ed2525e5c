//! QQwry database header structure

use crate::database::source::ByteSource;
use crate::error::{Result, SeekError};

/// Length of one index record: 4-byte start IP + 3-byte end-record offset
pub const INDEX_RECORD_LEN: u32 = 7;

/// Absolute offsets of the first and last index records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QQwryHeader {
    pub index_begin: u32,
    pub index_end: u32,
}

impl QQwryHeader {
    /// Parse and validate the 8-byte header.
    ///
    /// Any failure means the whole database is unusable.
    pub fn parse(source: &dyn ByteSource) -> Result<Self> {
        if source.len() < 8 {
            return Err(SeekError::unavailable(format!(
                "file too small ({} bytes)",
                source.len()
            )));
        }

        let index_begin = source
            .read_u32_le(0)
            .map_err(|e| SeekError::unavailable(format!("unreadable header: {}", e)))?;
        let index_end = source
            .read_u32_le(4)
            .map_err(|e| SeekError::unavailable(format!("unreadable header: {}", e)))?;

        if index_begin < 8 || index_begin > index_end {
            return Err(SeekError::unavailable(format!(
                "bad index bounds {}..={}",
                index_begin, index_end
            )));
        }
        if (index_end - index_begin) % INDEX_RECORD_LEN != 0 {
            return Err(SeekError::unavailable(format!(
                "index span {} is not a multiple of {}",
                index_end - index_begin,
                INDEX_RECORD_LEN
            )));
        }
        if u64::from(index_end) + u64::from(INDEX_RECORD_LEN) > source.len() {
            return Err(SeekError::unavailable(format!(
                "index ends past end of file ({} > {})",
                u64::from(index_end) + u64::from(INDEX_RECORD_LEN),
                source.len()
            )));
        }

        Ok(Self {
            index_begin,
            index_end,
        })
    }

    /// Number of index records
    pub fn record_count(&self) -> u32 {
        (self.index_end - self.index_begin) / INDEX_RECORD_LEN + 1
    }
}
