//! Resolved location value and the literal sentinels stored in QQwry files

use serde::Serialize;

/// Country reported when an address cannot be resolved
pub const UNKNOWN_COUNTRY: &str = "未知国家";

/// Area reported when an address cannot be resolved or has no area
pub const UNKNOWN_AREA: &str = "未知地区";

/// Placeholder text the database vendor stores for "no data"
pub const PLACEHOLDER: &str = " CZ88.NET";

/// Message returned for every query when the database could not be opened
pub const INVALID_DATABASE: &str = "错误的IP数据库文件";

/// Country and area text for one IP range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub country: String,
    pub area: String,
}

impl Location {
    pub fn new<C: Into<String>, A: Into<String>>(country: C, area: A) -> Self {
        Self {
            country: country.into(),
            area: area.into(),
        }
    }

    /// The "unknown country / unknown area" pair
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_COUNTRY, UNKNOWN_AREA)
    }

    pub fn is_unknown(&self) -> bool {
        self.country == UNKNOWN_COUNTRY && self.area == UNKNOWN_AREA
    }

    /// "country area" with sentinels and the vendor placeholder dropped
    pub fn address(&self) -> String {
        let country = display_part(&self.country);
        let area = display_part(&self.area);
        format!("{} {}", country, area).trim().to_string()
    }
}

fn display_part(part: &str) -> &str {
    if part == UNKNOWN_COUNTRY || part == UNKNOWN_AREA || part.trim() == PLACEHOLDER.trim() {
        ""
    } else {
        part
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_joins_parts() {
        assert_eq!(Location::new("中国", "北京").address(), "中国 北京");
        assert_eq!(Location::new("X", "").address(), "X");
        assert_eq!(Location::new("", "Y").address(), "Y");
    }

    #[test]
    fn test_address_filters_placeholder() {
        assert_eq!(Location::new("美国", PLACEHOLDER).address(), "美国");
        assert_eq!(Location::new("美国", "CZ88.NET").address(), "美国");
        assert_eq!(Location::new(PLACEHOLDER, PLACEHOLDER).address(), "");
    }

    #[test]
    fn test_address_filters_unknown() {
        assert_eq!(Location::unknown().address(), "");
        assert_eq!(Location::new("局域网", UNKNOWN_AREA).address(), "局域网");
        assert!(Location::unknown().is_unknown());
        assert!(!Location::new("局域网", UNKNOWN_AREA).is_unknown());
    }
}
