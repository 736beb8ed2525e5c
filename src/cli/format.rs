//! Output formatting for lookups

use crate::database::{GeoLookupService, INVALID_DATABASE, Location};
use crate::regex::find_ipv4;
use serde::Serialize;

#[cfg(feature = "colored-output")]
use colored::Colorize;

/// One resolved address, as emitted in JSON mode
#[derive(Debug, Serialize)]
pub struct LookupRecord<'a> {
    pub ip: &'a str,
    pub country: String,
    pub area: String,
    pub address: String,
}

impl<'a> LookupRecord<'a> {
    pub fn new(ip: &'a str, location: Option<Location>) -> Self {
        match location {
            Some(location) => Self {
                ip,
                address: location.address(),
                country: location.country,
                area: location.area,
            },
            None => Self {
                ip,
                country: INVALID_DATABASE.to_string(),
                area: INVALID_DATABASE.to_string(),
                address: INVALID_DATABASE.to_string(),
            },
        }
    }
}

/// `ip -> address`, with a marker when nothing is known
pub fn format_compact(ip: &str, address: &str) -> String {
    if address.is_empty() {
        format!("{} -> [Not found]", ip)
    } else {
        format!("{} -> {}", ip, address)
    }
}

/// Lookup records for every IPv4 literal in `text`, as pretty JSON
pub fn format_json(text: &str, service: &GeoLookupService) -> Result<String, serde_json::Error> {
    let records: Vec<_> = find_ipv4(text)
        .into_iter()
        .map(|(_, _, ip)| LookupRecord::new(ip, service.lookup(ip)))
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Copy of `line` with ` [address]` inserted after each IPv4 literal
pub fn annotate_line(line: &str, service: &GeoLookupService, use_color: bool) -> String {
    let mut result = String::with_capacity(line.len());
    let mut last = 0;

    for (start, end, ip) in find_ipv4(line) {
        result.push_str(&line[last..start]);
        result.push_str(ip);
        last = end;

        let address = service.address(ip);
        if address.is_empty() {
            continue;
        }
        result.push_str(&format!(" [{}]", paint(&address, use_color)));
    }
    result.push_str(&line[last..]);
    result
}

#[cfg(feature = "colored-output")]
fn paint(text: &str, use_color: bool) -> String {
    if use_color {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(not(feature = "colored-output"))]
fn paint(text: &str, _use_color: bool) -> String {
    text.to_string()
}
