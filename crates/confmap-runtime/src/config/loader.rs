//! Configuration loader using figment.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: enables TOML configuration files (`confmap.toml`, `config.toml`)
//! - `yaml-config`: enables YAML configuration files (`confmap.yaml`, `confmap.yml`, etc.)
//!
//! Both features can be enabled simultaneously; if so, both file formats are searched and loaded.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Profile-specific config file (`confmap.{profile}.toml` / `confmap.{profile}.yaml`)
//! 3. Main config file (`confmap.toml` / `confmap.yaml`)
//! 4. Environment variables (`CONFMAP_*`)
//! 5. Programmatic overrides (`set`, `merge`), key by key
//!
//! # Environment Variable Mapping
//!
//! Environment variables are mapped using the `CONFMAP_` prefix with `__` as separator:
//!
//! - `CONFMAP_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `CONFMAP_FLATTEN__PREFIX=debezium` → `flatten.prefix = "debezium"`
//!
//! # Example
//!
//! ```rust,ignore
//! use confmap_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .profile("production")
//!     .file("./deploy/confmap.toml")
//!     .set("flatten.prefix", "debezium.source")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use figment::{Figment, Provider};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::ConfmapConfig;
use super::validation::validate_config;

/// Configuration profile for environment-specific settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Profile {
    /// Development profile (default).
    #[default]
    Development,
    /// Production profile.
    Production,
    /// Custom profile name.
    Custom(String),
}

impl Profile {
    /// Returns the profile name as a string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Custom(name) => name,
        }
    }

    /// Parses a profile name, accepting the `dev`/`prod` short forms.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Creates a profile from `CONFMAP_PROFILE` or defaults to Development.
    pub fn from_env() -> Self {
        std::env::var("CONFMAP_PROFILE")
            .map(|p| Self::parse(&p))
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Base figment instance.
    figment: Figment,
    /// Configuration profile.
    profile: Profile,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            profile: Profile::from_env(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Sets the configuration profile.
    pub fn profile(mut self, profile: impl AsRef<str>) -> Self {
        self.profile = Profile::parse(profile.as_ref());
        self
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables loading environment variables (default: true).
    pub fn with_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Overrides a single value by its dotted path, e.g. `flatten.prefix`.
    ///
    /// Values set this way win over files and environment variables; every
    /// other field keeps the value of the lower layers.
    pub fn set<T: Serialize>(mut self, key: &str, value: T) -> Self {
        self.figment = self.figment.merge(Serialized::default(key, value));
        self
    }

    /// Merges a partial configuration source on top of every other layer.
    ///
    /// Only the keys the provider actually yields are overridden.
    pub fn merge<P: Provider>(mut self, provider: P) -> Self {
        self.figment = self.figment.merge(provider);
        self
    }

    /// Loads, validates and returns the configuration.
    pub fn load(self) -> ConfigResult<ConfmapConfig> {
        let profile = self.profile.clone();
        let figment = self.build_figment()?;

        let config: ConfmapConfig = figment.extract()?;
        validate_config(&config)?;

        debug!(
            profile = %profile,
            logging_level = %config.logging.level,
            prefix = ?config.flatten.prefix,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ConfmapConfig::default()));

        if let Some(path) = self.config_file.take() {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path));
            }
            let file = file_figment(&path).ok_or_else(|| {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
                ConfigError::UnsupportedFormat(ext.to_string())
            })?;
            info!(path = %path.display(), "Loading configuration file");
            figment = figment.merge(file);
        } else {
            figment = self.load_config_files(figment);
        }

        if self.load_env {
            trace!("Loading environment variables with CONFMAP_ prefix");
            figment = figment.merge(Env::prefixed("CONFMAP_").ignore(&["profile"]).split("__"));
        }

        // Programmatic overrides win over every other source.
        let user_figment = std::mem::take(&mut self.figment);
        Ok(figment.merge(user_figment))
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("confmap"));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    /// Searches one format's base names, trying a profile-specific variant
    /// (`confmap.{profile}.toml`) before each base file. Stops at the first
    /// base file found.
    fn load_format_files(
        &self,
        mut figment: Figment,
        search_paths: &[PathBuf],
        base_names: &[&str],
    ) -> (Figment, bool) {
        for search_path in search_paths {
            for base_name in base_names {
                let Some((stem, ext)) = base_name.rsplit_once('.') else {
                    continue;
                };

                let profile_path =
                    search_path.join(format!("{stem}.{}.{ext}", self.profile.as_str()));
                if let Some(file) = existing_file_figment(&profile_path) {
                    debug!(path = %profile_path.display(), "Loading profile-specific config");
                    figment = figment.merge(file);
                }

                let base_path = search_path.join(base_name);
                if let Some(file) = existing_file_figment(&base_path) {
                    info!(path = %base_path.display(), "Loading configuration file");
                    return (figment.merge(file), true);
                }
            }
        }
        (figment, false)
    }

    /// Searches for and loads configuration files from search paths.
    ///
    /// Formats whose feature is disabled are skipped.
    fn load_config_files(&self, mut figment: Figment) -> Figment {
        let search_paths = self.resolve_search_paths();
        let mut found = false;

        for base_names in CONFIG_FILE_NAMES {
            let (merged, ok) = self.load_format_files(figment, &search_paths, base_names);
            figment = merged;
            found |= ok;
        }

        if !found {
            warn!(paths = ?search_paths, "No configuration file found, using defaults");
        }
        figment
    }
}

/// Base config file names, grouped by format.
const CONFIG_FILE_NAMES: &[&[&str]] = &[
    &["confmap.toml", "config.toml"],
    &["confmap.yaml", "confmap.yml", "config.yaml", "config.yml"],
];

/// Opens `path` with the provider for its extension, or `None` when that
/// format is not compiled in.
fn file_figment(path: &Path) -> Option<Figment> {
    match path.extension().and_then(|e| e.to_str()) {
        #[cfg(feature = "toml-config")]
        Some("toml") => Some(Figment::from(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        Some("yaml" | "yml") => Some(Figment::from(Yaml::file(path))),
        _ => None,
    }
}

fn existing_file_figment(path: &Path) -> Option<Figment> {
    if path.exists() {
        file_figment(path)
    } else {
        None
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<ConfmapConfig> {
    ConfigLoader::new().load()
}

/// Loads configuration from a specific file, with environment overrides.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<ConfmapConfig> {
    ConfigLoader::new().file(path).load()
}

// =============================================================================
// Tests
// =============================================================================
