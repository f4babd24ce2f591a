//! confmap runtime - configuration, logging and document flattening.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`)
//! - Logging configuration (`LoggingBuilder`)
//! - Flattening of TOML/YAML/JSON documents into rendered properties (`Flattener`)
//!
//! ```rust,ignore
//! use confmap_runtime::{ConfigLoader, Flattener, logging};
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//!
//! let rendered = Flattener::new(config.flatten).flatten_file("connector.yaml")?;
//! println!("{}", rendered.properties);
//! ```

pub mod config;
pub mod error;
pub mod flatten;
pub mod logging;

// Re-exports
pub use config::{
    ConfigError, ConfigLoader, ConfigResult, ConfmapConfig, FlattenConfig, LoggingConfig,
};
pub use error::{RuntimeError, RuntimeResult};
pub use flatten::{Flattener, Rendered, read_document};
pub use logging::LoggingBuilder;

// Re-export tracing for use by other crates
pub use tracing;
