use crate::artifacts::core::error::Category;

/// A diff argument that is either text or raw bytes
///
/// The category is fixed when the value is built, so the diff entry points
/// check it once instead of branching at every use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Content {
    pub fn category(&self) -> Category {
        match self {
            Content::Text(_) => Category::Text,
            Content::Bytes(_) => Category::Bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Content::Text(_) => None,
            Content::Bytes(bytes) => Some(bytes),
        }
    }

    /// Literal rendering used in error messages: `"text"` or `b"bytes"`
    pub fn describe(&self) -> String {
        match self {
            Content::Text(text) => format!("{text:?}"),
            Content::Bytes(bytes) => format!("b\"{}\"", bytes.escape_ascii()),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<&[u8]> for Content {
    fn from(value: &[u8]) -> Self {
        Content::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Content {
    fn from(value: &[u8; N]) -> Self {
        Content::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Content {
    fn from(value: Vec<u8>) -> Self {
        Content::Bytes(value)
    }
}

/// Maps every byte to the char with the same code point (U+0000..=U+00FF).
///
/// The mapping is total and injective, so any byte string survives a trip
/// through the text renderers.
pub fn decode_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}

/// Inverse of `decode_bytes`.
///
/// Renderers only emit chars taken from decoded input or ASCII markup, all of
/// which fit in one byte.
pub fn encode_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|ch| ch as u8).collect()
}
