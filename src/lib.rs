//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (`core-runtime`, `core-metadata`). Host applications can
//! depend on `audiotag-workspace` and enable the `metadata` feature without
//! needing to wire each crate individually.

pub use core_runtime;

#[cfg(feature = "metadata")]
pub use core_metadata;
