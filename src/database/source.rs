//! Random-offset access to database bytes
//!
//! Every read takes an absolute offset; no cursor is shared between callers,
//! so a single source can serve concurrent lookups.

use crate::error::{Result, SeekError};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use super::qqwry::utils::{bytes3_to_u32, swap_ip_order};

/// Chunk size used when scanning for a string terminator
const CSTRING_CHUNK: usize = 64;

/// Default size of a single memory-mapped window (1 GiB)
pub const DEFAULT_MMAP_WINDOW: u64 = 1 << 30;

/// Read-only, absolute-offset view over a database's bytes
pub trait ByteSource: Send + Sync {
    /// Total length in bytes
    fn len(&self) -> u64;

    /// Fill `buf` with the bytes starting at `offset`.
    ///
    /// Fails with [`SeekError::OutOfBounds`] if the range is not fully inside
    /// the source; `buf` contents are unspecified in that case.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_u8(&self, offset: u64) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_at(offset, &mut buf)?;
        Ok(buf[0])
    }

    /// 3-byte little-endian integer
    fn read_u24_le(&self, offset: u64) -> Result<u32> {
        let mut buf = [0u8; 3];
        self.read_at(offset, &mut buf)?;
        Ok(bytes3_to_u32(&buf))
    }

    fn read_u32_le(&self, offset: u64) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_at(offset, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// 4-byte IP stored in file order, returned most significant octet first
    fn read_ip(&self, offset: u64) -> Result<[u8; 4]> {
        let mut buf = [0u8; 4];
        self.read_at(offset, &mut buf)?;
        Ok(swap_ip_order(buf))
    }

    fn read_bytes(&self, offset: u64, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_at(offset, &mut buf)?;
        Ok(buf)
    }

    /// Bytes from `offset` up to (not including) the next zero byte.
    ///
    /// Running off the end of the source without a terminator is an error.
    fn read_cstring(&self, offset: u64) -> Result<Vec<u8>> {
        let total = self.len();
        let mut out = Vec::new();
        let mut pos = offset;
        let mut chunk = [0u8; CSTRING_CHUNK];

        loop {
            let remaining = total.saturating_sub(pos);
            if remaining == 0 {
                return Err(SeekError::OutOfBounds { offset: pos, len: total });
            }
            let n = remaining.min(CSTRING_CHUNK as u64) as usize;
            self.read_at(pos, &mut chunk[..n])?;

            if let Some(end) = chunk[..n].iter().position(|&b| b == 0) {
                out.extend_from_slice(&chunk[..end]);
                return Ok(out);
            }
            out.extend_from_slice(&chunk[..n]);
            pos += n as u64;
        }
    }
}

fn check_range(offset: u64, want: usize, len: u64) -> Result<usize> {
    match offset.checked_add(want as u64) {
        Some(end) if end <= len => Ok(offset as usize),
        _ => Err(SeekError::OutOfBounds { offset, len }),
    }
}

/// Database held entirely in memory
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl ByteSource for MemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let start = check_range(offset, buf.len(), self.len())?;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        Ok(())
    }

    fn read_cstring(&self, offset: u64) -> Result<Vec<u8>> {
        let start = check_range(offset, 0, self.len())?;
        let rest = &self.data[start..];
        match rest.iter().position(|&b| b == 0) {
            Some(end) => Ok(rest[..end].to_vec()),
            None => Err(SeekError::OutOfBounds {
                offset: self.len(),
                len: self.len(),
            }),
        }
    }
}

/// Plain file access; the file cursor is guarded so each seek+read is atomic
pub struct FileSource {
    file: Mutex<File>,
    len: u64,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        Ok(Self {
            file: Mutex::new(file),
            len,
        })
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_range(offset, buf.len(), self.len)?;
        let mut file = self
            .file
            .lock()
            .map_err(|e| SeekError::Io(std::io::Error::other(e.to_string())))?;
        file.seek(SeekFrom::Start(offset))?;
        file.read_exact(buf)?;
        Ok(())
    }
}

/// Memory-mapped file split into fixed-size windows
pub struct MmapSource {
    windows: Vec<Mmap>,
    window: u64,
    len: u64,
}

impl MmapSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_window(path, DEFAULT_MMAP_WINDOW)
    }

    pub fn open_with_window<P: AsRef<Path>>(path: P, window: u64) -> Result<Self> {
        if window == 0 {
            return Err(SeekError::config("mmap window must be non-zero"));
        }

        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();

        let mut windows = Vec::new();
        let mut start = 0u64;
        while start < len {
            let size = window.min(len - start) as usize;
            // SAFETY: the database is opened read-only and never written by this process
            let map = unsafe { MmapOptions::new().offset(start).len(size).map(&file)? };
            windows.push(map);
            start += window;
        }

        log::debug!(
            "Mapped {:?}: {} bytes in {} window(s)",
            path.as_ref(),
            len,
            windows.len()
        );

        Ok(Self {
            windows,
            window,
            len,
        })
    }
}

impl ByteSource for MmapSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_range(offset, buf.len(), self.len)?;

        let mut pos = offset;
        let mut filled = 0;
        while filled < buf.len() {
            let idx = (pos / self.window) as usize;
            let within = (pos % self.window) as usize;
            let map = &self.windows[idx];
            let n = (map.len() - within).min(buf.len() - filled);
            buf[filled..filled + n].copy_from_slice(&map[within..within + n]);
            filled += n;
            pos += n as u64;
        }
        Ok(())
    }
}
