//! qqwry-seek: offline IPv4 geolocation over QQwry databases
//!
//! The core is [`GeoLookupService`]: open a database once, share it behind an
//! `Arc`, and call [`country`](GeoLookupService::country),
//! [`area`](GeoLookupService::area) or [`address`](GeoLookupService::address)
//! from any thread. Queries never fail; a missing or damaged database turns
//! every answer into [`INVALID_DATABASE`].
//!
//! ```no_run
//! use qqwry_seek::GeoLookupService;
//!
//! let service = GeoLookupService::open("/usr/share/qqwry/qqwry.dat");
//! println!("{}", service.address("114.114.114.114"));
//! ```

pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod regex;
pub mod utils;

pub use config::AppConfig;
pub use database::{
    ByteSource, GeoLookupService, INVALID_DATABASE, IpQuery, Location, LookupCache, UNKNOWN_AREA,
    UNKNOWN_COUNTRY,
};
pub use error::{ErrorKind, Result, SeekError};
