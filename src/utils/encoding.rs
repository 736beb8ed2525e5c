//! Character encoding utilities
//!
//! QQwry stores all text as GBK; everything leaving the database is decoded
//! to UTF-8 here.

use encoding_rs::GBK;

/// Convert GBK encoded bytes to a UTF-8 string
///
/// Invalid sequences become U+FFFD. Surrounding whitespace is preserved so
/// vendor placeholders such as `" CZ88.NET"` compare exactly.
pub fn gbk_to_utf8(data: &[u8]) -> String {
    let (cow, _encoding_used, had_errors) = GBK.decode(data);

    if had_errors {
        log::debug!("GBK decoding had errors for bytes: {:?}", data);
    }

    cow.into_owned()
}
