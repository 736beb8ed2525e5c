//! Binary search over the QQwry index region

use crate::database::source::ByteSource;
use crate::error::Result;
use std::cmp::Ordering;

use super::header::{INDEX_RECORD_LEN, QQwryHeader};

/// Locates the end-record of the range containing an address
pub struct IndexSearcher<'a> {
    source: &'a dyn ByteSource,
    header: QQwryHeader,
}

impl<'a> IndexSearcher<'a> {
    pub fn new(source: &'a dyn ByteSource, header: QQwryHeader) -> Self {
        Self { source, header }
    }

    /// Absolute offset of the end-record for `ip`, or `None` if no range holds it.
    ///
    /// `ip` is most significant octet first.
    pub fn locate(&self, ip: [u8; 4]) -> Result<Option<u32>> {
        let begin = self.header.index_begin;
        let end = self.header.index_end;

        match ip.cmp(&self.start_ip(begin)?) {
            Ordering::Equal => return self.end_offset(begin).map(Some),
            Ordering::Less => return Ok(None),
            Ordering::Greater => {}
        }

        let mut lo = begin;
        let mut hi = end;
        let mut mid = begin;
        while lo < hi {
            mid = middle_offset(lo, hi);
            match ip.cmp(&self.start_ip(mid)?) {
                // the range may start exactly at mid, keep it in the window
                Ordering::Greater => lo = mid,
                Ordering::Less => {
                    if mid == hi {
                        hi -= INDEX_RECORD_LEN;
                        mid = hi;
                    } else {
                        hi = mid;
                    }
                }
                Ordering::Equal => return self.end_offset(mid).map(Some),
            }
        }

        // lo == hi == mid: the only candidate, confirm against its end IP
        let candidate = self.end_offset(mid)?;
        let end_ip = self.source.read_ip(u64::from(candidate))?;
        if ip <= end_ip {
            Ok(Some(candidate))
        } else {
            log::debug!(
                "{:?} falls in a gap after record at {} (ends {:?})",
                ip,
                mid,
                end_ip
            );
            Ok(None)
        }
    }

    fn start_ip(&self, record: u32) -> Result<[u8; 4]> {
        self.source.read_ip(u64::from(record))
    }

    fn end_offset(&self, record: u32) -> Result<u32> {
        self.source.read_u24_le(u64::from(record) + 4)
    }
}

/// Record boundary halfway between `lo` and `hi`, always past `lo` while `lo < hi`
fn middle_offset(lo: u32, hi: u32) -> u32 {
    let records = ((hi - lo) / INDEX_RECORD_LEN / 2).max(1);
    lo + records * INDEX_RECORD_LEN
}
