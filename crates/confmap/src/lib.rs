//! # confmap
//!
//! Flattens nested, typed configuration objects into dotted-namespace
//! properties, renders them as a properties file and fingerprints the
//! result for drift detection.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  as_configuration  ┌───────────┐  serialize   ┌──────────────┐
//! │  Mappable    │───────────────────▶│  Mapping  │─────────────▶│ key=value    │
//! │ (your types) │                    │ (builder) │  fingerprint │ md5 hex      │
//! └──────────────┘                    └───────────┘─────────────▶└──────────────┘
//! ```
//!
//! - **core**: [`Key`](core::Key), [`Mapping`](core::Mapping),
//!   [`Mappable`](core::Mappable) and fingerprints
//! - **runtime**: configuration loading, logging and document flattening
//!
//! ## Quick Start
//!
//! ```
//! use confmap::prelude::*;
//!
//! #[derive(Mappable)]
//! #[config(crate = "confmap::core")]
//! struct Offsets {
//!     #[config(rename = "storage")]
//!     kind: String,
//!     #[config(rename = "flush.interval.ms")]
//!     flush_interval_ms: Option<u64>,
//! }
//!
//! let offsets = Offsets {
//!     kind: "file".into(),
//!     flush_interval_ms: Some(1000),
//! };
//!
//! let mut config = Mapping::prefixed("debezium.source");
//! config.put_mappable("offset", &offsets);
//! assert_eq!(
//!     config.serialize(),
//!     "debezium.source.offset.flush.interval.ms=1000\ndebezium.source.offset.storage=file"
//! );
//! assert_eq!(config.fingerprint().len(), 32);
//! ```
//!
//! When the derive macro is used through this crate, the
//! `#[config(crate = "confmap::core")]` attribute points it at the re-export.
//!
//! ## Features
//!
//! - `derive` *(default)*: `#[derive(Mappable)]`
//! - `toml-config` *(default)*: TOML configuration and documents
//! - `yaml-config`: YAML configuration and documents
//! - `json-log`: JSON log output

pub use confmap_core as core;
pub use confmap_runtime as runtime;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use confmap_core::{ConfigValue, Document, Key, Mappable, Mapping, MappingError};
    pub use confmap_runtime::{
        ConfigLoader, ConfmapConfig, FlattenConfig, Flattener, Rendered, RuntimeError,
    };
}
