//! Regular expressions for matching IPv4 addresses in free text

use once_cell::sync::Lazy;
use regex::Regex;

/// IPv4 address regex
/// Matches standard IPv4 addresses like 192.168.1.1
pub static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)",
    )
    .expect("Failed to compile IPv4 regex")
});

/// Find all IPv4 addresses in text with their byte positions
pub fn find_ipv4(text: &str) -> Vec<(usize, usize, &str)> {
    IPV4_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end(), m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ipv4() {
        let found = find_ipv4("from 10.0.0.1 to 192.168.1.254 via gw");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], (5, 13, "10.0.0.1"));
        assert_eq!(found[1].2, "192.168.1.254");
    }

    #[test]
    fn test_find_ipv4_none() {
        assert!(find_ipv4("no addresses, just 1.2.3 and text").is_empty());
    }
}
