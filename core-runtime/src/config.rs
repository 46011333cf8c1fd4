//! # Reader Configuration Module
//!
//! Provides the knobs that control how the tag decoders treat a file.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `ReaderConfig`. Every field has a sensible default, so
//! `ReaderConfig::default()` is always valid. Values supplied through the
//! builder are checked in [`ReaderConfigBuilder::build`], failing fast with an
//! actionable message instead of letting a decoder run with a nonsense limit.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::ReaderConfig;
//!
//! let config = ReaderConfig::builder()
//!     .max_tag_size(8 * 1024 * 1024)
//!     .extract_pictures(false)
//!     .build()
//!     .expect("Failed to build config");
//!
//! assert!(!config.extract_pictures);
//! ```
//!
//! ## Error Handling
//!
//! ```should_panic
//! use core_runtime::config::ReaderConfig;
//!
//! // A zero-byte tag limit can never read anything
//! let config = ReaderConfig::builder()
//!     .max_tag_size(0)
//!     .build()
//!     .expect("Should fail - zero tag size");
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default upper bound for a single tag region or header buffer (64 MiB).
pub const DEFAULT_MAX_TAG_SIZE: u64 = 64 * 1024 * 1024;

/// Hard ceiling accepted by the builder (1 GiB).
pub const MAX_TAG_SIZE_LIMIT: u64 = 1024 * 1024 * 1024;

/// Default number of bytes shown when a binary value is rendered as hex.
pub const DEFAULT_BINARY_PREVIEW_LEN: usize = 16;

/// Largest accepted binary preview length.
pub const MAX_BINARY_PREVIEW_LEN: usize = 4096;

/// Settings shared by every tag decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Largest declared tag region (ID3v2 frame area, ASF header, FLAC block)
    /// the decoders will buffer. Anything larger is refused.
    pub max_tag_size: u64,

    /// Keep embedded pictures as image records.
    ///
    /// When disabled, pictures still appear in the display lines but their
    /// bytes are dropped.
    pub extract_pictures: bool,

    /// Replace `(n)` references in ID3v2 genre frames with genre names.
    pub resolve_numeric_genres: bool,

    /// Bytes rendered for binary values in display lines and the tag store.
    pub binary_preview_len: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_tag_size: DEFAULT_MAX_TAG_SIZE,
            extract_pictures: true,
            resolve_numeric_genres: true,
            binary_preview_len: DEFAULT_BINARY_PREVIEW_LEN,
        }
    }
}

impl ReaderConfig {
    /// Creates a new builder for constructing a `ReaderConfig`.
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Tag size limit is within 1 byte..=1 GiB
    /// - Binary preview length does not exceed 4096 bytes
    pub fn validate(&self) -> Result<()> {
        if self.max_tag_size == 0 {
            return Err(Error::Config(
                "Maximum tag size must be greater than 0 bytes".to_string(),
            ));
        }

        if self.max_tag_size > MAX_TAG_SIZE_LIMIT {
            return Err(Error::Config(format!(
                "Maximum tag size exceeds limit of 1 GiB ({} bytes)",
                MAX_TAG_SIZE_LIMIT
            )));
        }

        if self.binary_preview_len > MAX_BINARY_PREVIEW_LEN {
            return Err(Error::Config(format!(
                "Binary preview length exceeds maximum of {} bytes",
                MAX_BINARY_PREVIEW_LEN
            )));
        }

        Ok(())
    }
}

/// Builder for constructing [`ReaderConfig`] instances.
///
/// Unset fields fall back to the [`ReaderConfig::default`] values.
#[derive(Debug, Default)]
pub struct ReaderConfigBuilder {
    max_tag_size: Option<u64>,
    extract_pictures: Option<bool>,
    resolve_numeric_genres: Option<bool>,
    binary_preview_len: Option<usize>,
}

impl ReaderConfigBuilder {
    /// Sets the largest tag region the decoders will buffer, in bytes.
    ///
    /// Default: 64 MiB
    ///
    /// # Examples
    ///
    /// ```
    /// use core_runtime::config::ReaderConfig;
    ///
    /// let builder = ReaderConfig::builder()
    ///     .max_tag_size(16 * 1024 * 1024);
    /// ```
    pub fn max_tag_size(mut self, bytes: u64) -> Self {
        self.max_tag_size = Some(bytes);
        self
    }

    /// Enables or disables keeping embedded picture bytes.
    pub fn extract_pictures(mut self, enabled: bool) -> Self {
        self.extract_pictures = Some(enabled);
        self
    }

    /// Enables or disables `(n)` genre resolution for ID3v2.
    pub fn resolve_numeric_genres(mut self, enabled: bool) -> Self {
        self.resolve_numeric_genres = Some(enabled);
        self
    }

    /// Sets how many bytes of a binary value are shown as hex.
    pub fn binary_preview_len(mut self, len: usize) -> Self {
        self.binary_preview_len = Some(len);
        self
    }

    /// Builds the final `ReaderConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any value is out of range.
    pub fn build(self) -> Result<ReaderConfig> {
        let defaults = ReaderConfig::default();

        let config = ReaderConfig {
            max_tag_size: self.max_tag_size.unwrap_or(defaults.max_tag_size),
            extract_pictures: self.extract_pictures.unwrap_or(defaults.extract_pictures),
            resolve_numeric_genres: self
                .resolve_numeric_genres
                .unwrap_or(defaults.resolve_numeric_genres),
            binary_preview_len: self
                .binary_preview_len
                .unwrap_or(defaults.binary_preview_len),
        };

        config.validate()?;

        Ok(config)
    }
}
