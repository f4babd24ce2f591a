//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfmapConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Document flattening settings.
    #[serde(default)]
    pub flatten: FlattenConfig,
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level name as used in filter directives.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to the `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature; falls back to `Full` otherwise.
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    /// Default, so that rendered properties on stdout stay clean.
    #[default]
    Stderr,
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level.
    pub level: LogLevel,

    /// Output format.
    pub format: LogFormat,

    /// Output destination.
    pub output: LogOutput,

    /// Include thread IDs.
    pub thread_ids: bool,

    /// Include file names and line numbers.
    pub file_location: bool,

    /// Log file path, used with `output = "file"`.
    pub file_path: Option<PathBuf>,

    /// Per-module levels, e.g. `confmap_core = "trace"`.
    pub filters: BTreeMap<String, LogLevel>,
}

// =============================================================================
// Flattening
// =============================================================================

/// Settings for flattening structured documents into properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Namespace under which document properties are written.
    pub prefix: Option<String>,

    /// Prefix of synthesized list item names (`item0`, `item1`, ...).
    pub list_item_prefix: String,

    /// Properties always written with their exact name, bypassing `prefix`.
    pub overrides: BTreeMap<String, String>,

    /// Top-level document fields to leave out.
    pub exclude: Vec<String>,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            prefix: None,
            list_item_prefix: default_list_item_prefix(),
            overrides: BTreeMap::new(),
            exclude: Vec::new(),
        }
    }
}

fn default_list_item_prefix() -> String {
    "item".to_string()
}
