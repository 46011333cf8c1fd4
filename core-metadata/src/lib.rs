//! # Audio Tag Decoding Module
//!
//! Reads embedded metadata from WMA/ASF, MP3 (ID3v1, ID3v2.2/2.3/2.4) and
//! FLAC files into a uniform [`TagReport`].
//!
//! ## Overview
//!
//! This module handles:
//! - Signature detection and container dispatch ([`reader`])
//! - ASF header object walking ([`asf`])
//! - ID3v1 blocks and ID3v2 frames ([`id3`])
//! - FLAC metadata blocks ([`flac`])
//! - Canonical key lookup across formats ([`normalize`])
//! - Embedded picture records ([`picture`])
//!
//! Decoding is synchronous and single-pass. Malformed input never panics:
//! the report keeps every tag read before a structural error and carries the
//! error in [`TagReport::failure`].
//!
//! ## Usage
//!
//! ```ignore
//! use core_metadata::TagReader;
//!
//! let report = TagReader::new().read_path("track.flac")?;
//! println!("[{}] {}", report.version_name(), report.get("TITLE"));
//! for line in &report.lines {
//!     println!("{line}");
//! }
//! ```

pub mod asf;
pub mod cursor;
pub mod error;
pub mod flac;
pub mod id3;
pub mod normalize;
pub mod picture;
pub mod reader;
pub mod report;
pub mod store;
pub mod tables;
pub mod text;

pub use error::{MetadataError, Result};
pub use picture::ImageRecord;
pub use reader::{ContainerKind, TagDecoder, TagReader};
pub use report::{AudioProperties, FormatVersion, TagReport};
pub use store::TagStore;
