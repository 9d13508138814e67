use crate::artifacts::core::error::DiffError;

/// Highest code point each known charset label can represent
const CHARSET_LIMITS: phf::Map<&'static str, u32> = phf::phf_map! {
    "utf-8" => 0x10FFFF,
    "utf8" => 0x10FFFF,
    "utf-16" => 0x10FFFF,
    "utf16" => 0x10FFFF,
    "utf-32" => 0x10FFFF,
    "utf32" => 0x10FFFF,
    "us-ascii" => 0x7F,
    "ascii" => 0x7F,
    "iso-8859-1" => 0xFF,
    "iso8859-1" => 0xFF,
    "latin-1" => 0xFF,
    "latin1" => 0xFF,
    "l1" => 0xFF,
};

/// Limit for a charset label; lookup ignores case and `_`/`-` spelling.
pub(crate) fn charset_limit(charset: &str) -> Result<u32, DiffError> {
    let label = charset.trim().to_ascii_lowercase().replace('_', "-");
    CHARSET_LIMITS
        .get(label.as_str())
        .copied()
        .ok_or_else(|| DiffError::UnknownCharset(charset.to_string()))
}

/// Replaces every char above `limit` with a decimal character reference.
pub(crate) fn encode_references(text: &str, limit: u32) -> String {
    let mut encoded = String::with_capacity(text.len());
    for ch in text.chars() {
        if u32::from(ch) > limit {
            encoded.push_str(&format!("&#{};", u32::from(ch)));
        } else {
            encoded.push(ch);
        }
    }
    encoded
}
