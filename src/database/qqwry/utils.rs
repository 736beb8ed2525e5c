//! Utility functions for QQwry database

/// Convert 3 bytes to u32 (little-endian)
pub fn bytes3_to_u32(data: &[u8; 3]) -> u32 {
    u32::from(data[0]) | u32::from(data[1]) << 8 | u32::from(data[2]) << 16
}

/// Reverse file-order IP bytes so the most significant octet comes first
pub fn swap_ip_order(raw: [u8; 4]) -> [u8; 4] {
    u32::from_le_bytes(raw).to_be_bytes()
}

/// Dotted-decimal form of four octets
pub fn octets_to_string(ip: [u8; 4]) -> String {
    format!("{}.{}.{}.{}", ip[0], ip[1], ip[2], ip[3])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes3_to_u32() {
        let data = [0x01, 0x02, 0x03];
        let result = bytes3_to_u32(&data);
        assert_eq!(result, 0x00030201);
        assert_eq!(bytes3_to_u32(&[0xff, 0xff, 0xff]), 0x00ff_ffff);
    }

    #[test]
    fn test_swap_ip_order() {
        assert_eq!(swap_ip_order([4, 3, 2, 1]), [1, 2, 3, 4]);
    }

    #[test]
    fn test_octets_to_string() {
        assert_eq!(octets_to_string([255, 0, 10, 1]), "255.0.10.1");
    }
}
