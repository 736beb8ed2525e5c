//! Public lookup façade
//!
//! `GeoLookupService` wires the byte source, index search, record decoding
//! and cache together. Its query methods are total: every failure is logged
//! and turned into a sentinel string, nothing is returned as an error.

use crate::config::{AppConfig, DatabaseConfig};
use crate::error::{Result, SeekError};
use std::net::Ipv4Addr;
use std::path::Path;

use super::cache::LookupCache;
use super::location::{INVALID_DATABASE, Location};
use super::qqwry::{IndexSearcher, QQwryHeader, RecordResolver};
use super::qqwry::utils::octets_to_string;
use super::source::{ByteSource, FileSource, MemorySource, MmapSource};

/// Anything that can name an IPv4 address
pub trait IpQuery {
    /// Octets, most significant first
    fn to_octets(&self) -> [u8; 4];
}

impl IpQuery for str {
    fn to_octets(&self) -> [u8; 4] {
        parse_dotted(self)
    }
}

impl IpQuery for String {
    fn to_octets(&self) -> [u8; 4] {
        parse_dotted(self)
    }
}

impl IpQuery for [u8; 4] {
    fn to_octets(&self) -> [u8; 4] {
        *self
    }
}

impl IpQuery for Ipv4Addr {
    fn to_octets(&self) -> [u8; 4] {
        self.octets()
    }
}

impl<T: IpQuery + ?Sized> IpQuery for &T {
    fn to_octets(&self) -> [u8; 4] {
        (**self).to_octets()
    }
}

/// Lenient dotted-decimal parsing.
///
/// Empty tokens are skipped and each value is truncated to its low 8 bits.
/// The first token that is not an integer ends parsing; octets not yet
/// filled stay zero.
pub fn parse_dotted(ip: &str) -> [u8; 4] {
    let mut octets = [0u8; 4];
    let tokens = ip.split('.').filter(|t| !t.is_empty());
    for (slot, token) in octets.iter_mut().zip(tokens) {
        match token.parse::<i32>() {
            Ok(value) => *slot = value as u8,
            Err(e) => {
                log::debug!("Bad octet {:?} in {:?}: {}", token, ip, e);
                break;
            }
        }
    }
    octets
}

enum State {
    Ready {
        source: Box<dyn ByteSource>,
        header: QQwryHeader,
    },
    Unavailable(String),
}

/// IPv4 geolocation lookups over one QQwry database
pub struct GeoLookupService {
    state: State,
    cache: LookupCache,
}

impl GeoLookupService {
    /// Open a memory-mapped database, degrading instead of failing
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::open_with(path, &DatabaseConfig::default())
    }

    /// Open the database named by the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        match config.database_path() {
            Ok(path) => Self::open_with(path, &config.database),
            Err(e) => Self::unavailable(e),
        }
    }

    /// Open with explicit access settings, degrading instead of failing
    pub fn open_with<P: AsRef<Path>>(path: P, config: &DatabaseConfig) -> Self {
        Self::try_open_with(path, config).unwrap_or_else(Self::unavailable)
    }

    pub fn try_open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_open_with(path, &DatabaseConfig::default())
    }

    pub fn try_open_with<P: AsRef<Path>>(path: P, config: &DatabaseConfig) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading QQwry database from: {:?}", path);

        let opened: Result<Box<dyn ByteSource>> = if config.use_mmap {
            MmapSource::open_with_window(path, config.mmap_window)
                .map(|s| Box::new(s) as Box<dyn ByteSource>)
        } else {
            FileSource::open(path).map(|s| Box::new(s) as Box<dyn ByteSource>)
        };
        let source = opened
            .map_err(|e| SeekError::unavailable(format!("cannot open {:?}: {}", path, e)))?;

        Self::try_from_boxed(source)
    }

    /// Wrap an arbitrary byte source, degrading if its header is unusable
    pub fn from_source<S: ByteSource + 'static>(source: S) -> Self {
        Self::try_from_source(source).unwrap_or_else(Self::unavailable)
    }

    pub fn try_from_source<S: ByteSource + 'static>(source: S) -> Result<Self> {
        Self::try_from_boxed(Box::new(source))
    }

    /// Database image already in memory
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self::from_source(MemorySource::new(data))
    }

    fn try_from_boxed(source: Box<dyn ByteSource>) -> Result<Self> {
        let header = QQwryHeader::parse(source.as_ref())?;
        log::info!(
            "Successfully loaded QQwry database: {} records",
            header.record_count()
        );
        Ok(Self {
            state: State::Ready { source, header },
            cache: LookupCache::new(),
        })
    }

    fn unavailable(err: SeekError) -> Self {
        log::warn!("IP database unusable, lookups disabled: {}", err);
        Self {
            state: State::Unavailable(err.to_string()),
            cache: LookupCache::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    /// Why the database could not be used, if it could not
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            State::Unavailable(reason) => Some(reason),
            State::Ready { .. } => None,
        }
    }

    /// Number of index records, 0 when unavailable
    pub fn record_count(&self) -> u32 {
        match &self.state {
            State::Ready { header, .. } => header.record_count(),
            State::Unavailable(_) => 0,
        }
    }

    /// Number of memoized lookups
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Country and area for `ip`; `None` only when the database is unavailable.
    ///
    /// Addresses outside every range resolve to [`Location::unknown`].
    pub fn lookup<Q: IpQuery>(&self, ip: Q) -> Option<Location> {
        let State::Ready { source, header } = &self.state else {
            return None;
        };

        let octets = ip.to_octets();
        let key = octets_to_string(octets);
        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }

        let source = source.as_ref();
        let location = match IndexSearcher::new(source, *header).locate(octets) {
            Ok(Some(record)) => RecordResolver::new(source).resolve(record),
            Ok(None) => Location::unknown(),
            Err(e) => {
                log::debug!("Index search failed for {}: {}", key, e);
                Location::unknown()
            }
        };

        self.cache.put(&key, &location);
        Some(location)
    }

    pub fn country<Q: IpQuery>(&self, ip: Q) -> String {
        match self.lookup(ip) {
            Some(location) => location.country,
            None => INVALID_DATABASE.to_string(),
        }
    }

    pub fn area<Q: IpQuery>(&self, ip: Q) -> String {
        match self.lookup(ip) {
            Some(location) => location.area,
            None => INVALID_DATABASE.to_string(),
        }
    }

    /// "country area" with unknown sentinels and placeholders removed
    pub fn address<Q: IpQuery>(&self, ip: Q) -> String {
        match self.lookup(ip) {
            Some(location) => location.address(),
            None => INVALID_DATABASE.to_string(),
        }
    }
}
