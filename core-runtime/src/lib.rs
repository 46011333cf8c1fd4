//! # Core Runtime Module
//!
//! Provides the runtime infrastructure shared by the tag decoding crates:
//! - Logging and tracing infrastructure
//! - Reader configuration
//!
//! ## Overview
//!
//! Decoders in `core-metadata` emit `tracing` events and take a
//! [`ReaderConfig`](config::ReaderConfig) describing their limits. Host
//! applications call [`logging::init_logging`] once at startup to route
//! those events.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ReaderConfig, ReaderConfigBuilder};
pub use error::{Error, Result};
