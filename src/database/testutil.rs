//! Helpers for building small QQwry databases in tests

use crate::database::source::ByteSource;
use crate::error::Result;
use encoding_rs::GBK;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::qqwry::reader::{REDIRECT_MODE_1, REDIRECT_MODE_2};

/// Builds a QQwry image: header, record area, then the index
pub struct DbBuilder {
    buf: Vec<u8>,
    index: Vec<([u8; 4], u32)>,
}

impl DbBuilder {
    pub fn new() -> Self {
        Self {
            buf: vec![0; 8],
            index: Vec::new(),
        }
    }

    /// Current write position
    pub fn offset(&self) -> u32 {
        self.buf.len() as u32
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> u32 {
        let at = self.offset();
        self.buf.extend_from_slice(bytes);
        at
    }

    /// Zero-terminated string, returns its offset
    pub fn push_cstr(&mut self, s: &[u8]) -> u32 {
        let at = self.push_bytes(s);
        self.buf.push(0);
        at
    }

    /// Marker byte followed by a 3-byte little-endian pointer
    pub fn push_pointer(&mut self, marker: u8, target: u32) -> u32 {
        let b = target.to_le_bytes();
        self.push_bytes(&[marker, b[0], b[1], b[2]])
    }

    /// End-record (end IP + raw location bytes) registered in the index under `start`
    pub fn range(&mut self, start: [u8; 4], end: [u8; 4], location: &[u8]) -> u32 {
        let mut end_le = end;
        end_le.reverse();
        let at = self.push_bytes(&end_le);
        self.push_bytes(location);
        self.index.push((start, at));
        at
    }

    /// Range whose country and area are both stored inline
    pub fn inline_range(&mut self, start: [u8; 4], end: [u8; 4], country: &str, area: &str) -> u32 {
        let mut location = Vec::new();
        location.extend_from_slice(&GBK.encode(country).0);
        location.push(0);
        location.extend_from_slice(&GBK.encode(area).0);
        location.push(0);
        self.range(start, end, &location)
    }

    /// Range using a full redirect to a shared country/area block
    pub fn redirect_all_range(&mut self, start: [u8; 4], end: [u8; 4], block: u32) -> u32 {
        let b = block.to_le_bytes();
        self.range(start, end, &[REDIRECT_MODE_1, b[0], b[1], b[2]])
    }

    /// Range whose country is a pointer and whose area follows inline
    pub fn redirect_country_range(
        &mut self,
        start: [u8; 4],
        end: [u8; 4],
        country: u32,
        area: &[u8],
    ) -> u32 {
        let b = country.to_le_bytes();
        let mut location = vec![REDIRECT_MODE_2, b[0], b[1], b[2]];
        location.extend_from_slice(area);
        self.range(start, end, &location)
    }

    /// Append the index in insertion order and write the header
    pub fn finish(mut self) -> Vec<u8> {
        let begin = self.offset();
        let index = std::mem::take(&mut self.index);
        for (start, record) in &index {
            let mut start_le = *start;
            start_le.reverse();
            self.push_bytes(&start_le);
            self.push_bytes(&record.to_le_bytes()[..3]);
        }
        let end = begin + (index.len().max(1) as u32 - 1) * 7;
        self.buf[0..4].copy_from_slice(&begin.to_le_bytes());
        self.buf[4..8].copy_from_slice(&end.to_le_bytes());
        self.buf
    }
}

/// Wraps a source and counts `read_at` calls
pub struct CountingSource<S> {
    inner: S,
    reads: Arc<AtomicUsize>,
}

impl<S: ByteSource> CountingSource<S> {
    pub fn new(inner: S) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                reads: Arc::clone(&reads),
            },
            reads,
        )
    }
}

impl<S: ByteSource> ByteSource for CountingSource<S> {
    fn len(&self) -> u64 {
        self.inner.len()
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read_at(offset, buf)
    }
}
