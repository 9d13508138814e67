use std::fmt;

/// Content category of a diff argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Text,
    Bytes,
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Text => "text",
            Category::Bytes => "bytes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiffError {
    #[error("lines to compare must be {expected}, not {found} ({value})")]
    LineTypeMismatch {
        expected: Category,
        found: Category,
        value: String,
    },
    #[error("all arguments must be {expected}, not {found} ({value})")]
    ArgumentTypeMismatch {
        expected: Category,
        found: Category,
        value: String,
    },
    #[error("n must be > 0, got {0}")]
    InvalidCount(usize),
    #[error("cutoff must be in [0.0, 1.0], got {0}")]
    InvalidCutoff(f64),
    #[error("unknown charset: {0}")]
    UnknownCharset(String),
}
