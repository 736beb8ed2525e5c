//! Decoding of QQwry location records
//!
//! A location record sits 4 bytes into an end-record and takes one of three
//! shapes, selected by its first byte:
//!
//! - `0x01`: `[0x01][offset]` full redirect to a country/area block elsewhere
//! - `0x02`: `[0x02][country offset][area]`
//! - otherwise: `[country\0][area]` stored inline
//!
//! The area field is either `[0x01|0x02][offset]` or an inline string.

use crate::database::location::{Location, UNKNOWN_AREA};
use crate::database::source::ByteSource;
use crate::error::{Result, SeekError};
use crate::utils::encoding::gbk_to_utf8;

/// Redirect mode constants
pub const REDIRECT_MODE_1: u8 = 0x01;
pub const REDIRECT_MODE_2: u8 = 0x02;

/// Resolves end-record offsets into country/area text
pub struct RecordResolver<'a> {
    source: &'a dyn ByteSource,
}

impl<'a> RecordResolver<'a> {
    pub fn new(source: &'a dyn ByteSource) -> Self {
        Self { source }
    }

    /// Location stored for the end-record at `end_record`.
    ///
    /// Never fails: unreadable or inconsistent records give [`Location::unknown`].
    pub fn resolve(&self, end_record: u32) -> Location {
        match self.try_resolve(end_record) {
            Ok(location) => location,
            Err(e) => {
                log::debug!("Unresolvable record at {}: {}", end_record, e);
                Location::unknown()
            }
        }
    }

    pub fn try_resolve(&self, end_record: u32) -> Result<Location> {
        let (country, area_at) = self.read_country(u64::from(end_record) + 4)?;
        let area = self.read_area(area_at)?;
        Ok(Location { country, area })
    }

    /// Country text and the offset of the area field that follows it.
    ///
    /// A full redirect may appear only at the record itself, so a chain is
    /// at most one `0x01` hop followed by one `0x02` hop.
    fn read_country(&self, record: u64) -> Result<(String, u64)> {
        let mut pos = record;
        let mut redirected = false;

        loop {
            match self.source.read_u8(pos)? {
                REDIRECT_MODE_1 if redirected => {
                    return Err(SeekError::corrupt(format!(
                        "nested full redirect at {} (record {})",
                        pos, record
                    )));
                }
                REDIRECT_MODE_1 => {
                    pos = self.pointer_after(pos)?;
                    redirected = true;
                }
                REDIRECT_MODE_2 => {
                    let country = self.read_text(self.pointer_after(pos)?)?;
                    return Ok((country, pos + 4));
                }
                _ => {
                    let raw = self.source.read_cstring(pos)?;
                    let area_at = pos + raw.len() as u64 + 1;
                    return Ok((gbk_to_utf8(&raw), area_at));
                }
            }
        }
    }

    /// Target of the 3-byte pointer after the marker at `marker_at`
    fn pointer_after(&self, marker_at: u64) -> Result<u64> {
        Ok(u64::from(self.source.read_u24_le(marker_at + 1)?))
    }

    fn read_area(&self, pos: u64) -> Result<String> {
        match self.source.read_u8(pos)? {
            REDIRECT_MODE_1 | REDIRECT_MODE_2 => {
                let area_at = self.source.read_u24_le(pos + 1)?;
                if area_at == 0 {
                    Ok(UNKNOWN_AREA.to_string())
                } else {
                    self.read_text(u64::from(area_at))
                }
            }
            _ => self.read_text(pos),
        }
    }

    fn read_text(&self, pos: u64) -> Result<String> {
        let raw = self.source.read_cstring(pos)?;
        Ok(gbk_to_utf8(&raw))
    }
}
