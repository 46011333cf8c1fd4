//! # Logging
//!
//! The decoders only emit `tracing` events. Nothing reaches the terminal until
//! the host installs a subscriber with [`init_logging`], which writes to
//! stderr in one of three layouts and filters per crate.
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
//!
//! init_logging(
//!     LoggingConfig::default()
//!         .with_format(LogFormat::Compact)
//!         .with_level(LogLevel::Debug),
//! )?;
//! tracing::debug!(file = strip_path("/music/a.flac"), "Reading tags");
//! ```
//!
//! Without a custom filter, `core_runtime` and `core_metadata` log at the
//! configured level and every other target at `warn`.

use crate::error::{Error, Result};

use serde::{Deserialize, Serialize};
use std::io;
use tracing_subscriber::{
    filter::EnvFilter,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
    Layer, Registry,
};

/// Crates whose events follow [`LoggingConfig::level`] under the default filter.
const DECODER_TARGETS: [&str; 2] = ["core_runtime", "core_metadata"];

/// Minimum severity for the decoder crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive spelling understood by `EnvFilter`.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Layout of each stderr line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    /// Multi-line, coloured
    Pretty,
    /// One JSON object per event, fields flattened
    Json,
    /// One short line per event
    Compact,
}

impl Default for LogFormat {
    /// Pretty for debug builds, JSON for release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Full `EnvFilter` directive string, replacing the default per-crate filter
    pub filter: Option<String>,
    /// Print the event target (module path)
    pub display_target: bool,
    /// Print thread ids and names
    pub display_thread_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: LogLevel::Info,
            filter: None,
            display_target: true,
            display_thread_info: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }

    pub fn with_thread_info(mut self, display: bool) -> Self {
        self.display_thread_info = display;
        self
    }

    /// Directive string handed to `EnvFilter`.
    pub fn filter_directives(&self) -> String {
        if let Some(custom) = &self.filter {
            return custom.clone();
        }
        let level = self.level.directive();
        DECODER_TARGETS
            .iter()
            .fold(String::from("warn"), |acc, target| format!("{acc},{target}={level}"))
    }
}

type StderrLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`Error::Config`] when the filter does not parse or a global
/// subscriber is already installed. Only the first call in a process can
/// succeed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = build_filter(&config)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer(&config))
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install log subscriber: {e}")))
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let directives = config.filter_directives();
    EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Invalid log filter {directives:?}: {e}")))
}

fn stderr_layer(config: &LoggingConfig) -> StderrLayer {
    let base = tracing_subscriber::fmt::layer()
        .with_target(config.display_target)
        .with_thread_ids(config.display_thread_info)
        .with_thread_names(config.display_thread_info)
        .with_writer(io::stderr);

    match config.format {
        LogFormat::Pretty => base.pretty().boxed(),
        LogFormat::Json => base.json().flatten_event(true).boxed(),
        LogFormat::Compact => base.compact().boxed(),
    }
}

/// File name of `path`, for `file = ...` log fields.
///
/// Both `/` and `\` count as separators; a trailing separator yields `""`.
pub fn strip_path(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_decoder_crates() {
        let directives = LoggingConfig::default()
            .with_level(LogLevel::Debug)
            .filter_directives();
        assert_eq!(directives, "warn,core_runtime=debug,core_metadata=debug");
        assert!(build_filter(&LoggingConfig::default()).is_ok());
    }

    #[test]
    fn test_custom_filter_replaces_default() {
        let config = LoggingConfig::default()
            .with_level(LogLevel::Error)
            .with_filter("core_metadata=trace");
        assert_eq!(config.filter_directives(), "core_metadata=trace");
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        let config = LoggingConfig::default().with_filter("core_metadata=[[[");
        match build_filter(&config) {
            Err(Error::Config(msg)) => assert!(msg.contains("core_metadata=[[[")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_level_serde_and_order() {
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"warn\"");
        let level: LogLevel = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(level, LogLevel::Trace);
        assert!(LogLevel::Debug < LogLevel::Warn);
    }

    #[test]
    fn test_default_format_follows_build_profile() {
        let expected = if cfg!(debug_assertions) {
            LogFormat::Pretty
        } else {
            LogFormat::Json
        };
        assert_eq!(LogFormat::default(), expected);
    }

    #[test]
    fn test_strip_path() {
        assert_eq!(strip_path("/srv/music/a.flac"), "a.flac");
        assert_eq!(strip_path("D:\\Rips\\b.wma"), "b.wma");
        assert_eq!(strip_path("mixed/dir\\c.mp3"), "c.mp3");
        assert_eq!(strip_path("plain.mp3"), "plain.mp3");
        assert_eq!(strip_path("trailing/"), "");
    }
}
