use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Truncated {context}: needed {needed} bytes, {available} available")]
    TruncatedRead {
        context: &'static str,
        needed: u64,
        available: u64,
    },

    #[error("{context} declares {declared} bytes, exceeding the {limit} byte limit")]
    TagTooLarge {
        context: &'static str,
        declared: u64,
        limit: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] core_runtime::Error),
}

impl MetadataError {
    /// Build a truncation error for `context`.
    pub fn truncated(context: &'static str, needed: u64, available: u64) -> Self {
        Self::TruncatedRead {
            context,
            needed,
            available,
        }
    }

    /// Returns true if the input ended before a declared structure did.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedRead { .. })
    }

    /// Returns true if a declared size was refused by the reader limits.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, Self::TagTooLarge { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
