//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{ConfmapConfig, FlattenConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &ConfmapConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    validate_flatten_config(&config.flatten)?;
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output is \"file\"",
        ));
    }

    if logging.filters.keys().any(|module| module.trim().is_empty()) {
        return Err(ConfigError::validation(
            "logging.filters cannot contain an empty module name",
        ));
    }

    Ok(())
}

/// Validates flattening settings.
fn validate_flatten_config(flatten: &FlattenConfig) -> ConfigResult<()> {
    if let Some(prefix) = &flatten.prefix {
        validate_path("flatten.prefix", prefix)?;
    }

    if flatten.list_item_prefix.trim().is_empty() {
        return Err(ConfigError::validation(
            "flatten.list_item_prefix cannot be empty",
        ));
    }

    for key in flatten.overrides.keys() {
        validate_path("flatten.overrides", key)?;
    }

    if flatten.exclude.iter().any(|field| field.trim().is_empty()) {
        return Err(ConfigError::validation(
            "flatten.exclude cannot contain an empty field name",
        ));
    }

    Ok(())
}

/// Validates a dotted property path.
fn validate_path(field: &str, path: &str) -> ConfigResult<()> {
    if path.trim().is_empty() {
        return Err(ConfigError::validation(format!("{field} cannot be empty")));
    }

    if path.starts_with('.') || path.ends_with('.') || path.contains("..") {
        return Err(ConfigError::validation(format!(
            "{field}: '{path}' is not a valid dotted path"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = ConfmapConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_file_output_without_path() {
        let mut config = ConfmapConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());

        config.logging.file_path = Some("confmap.log".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_prefix() {
        let mut config = ConfmapConfig::default();
        for bad in ["", ".app", "app.", "a..b"] {
            config.flatten.prefix = Some(bad.to_string());
            let result = validate_config(&config);
            assert!(
                matches!(result, Err(ConfigError::ValidationError { .. })),
                "{bad:?} should be rejected"
            );
        }

        config.flatten.prefix = Some("debezium.source".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_overrides_and_items() {
        let mut config = ConfmapConfig::default();
        config
            .flatten
            .overrides
            .insert("quarkus..log".to_string(), "x".to_string());
        assert!(validate_config(&config).is_err());

        let mut config = ConfmapConfig::default();
        config.flatten.list_item_prefix = " ".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = ConfmapConfig::default();
        config.flatten.exclude = vec!["".to_string()];
        assert!(validate_config(&config).is_err());
    }
}
