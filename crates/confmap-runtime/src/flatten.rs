//! Flattening of configuration documents into rendered properties.
//!
//! A [`Flattener`] turns a structured document (TOML, YAML or JSON) into a
//! [`Mapping`] according to a [`FlattenConfig`], and [`Rendered`] holds the
//! canonical text together with its fingerprint:
//!
//! ```rust,ignore
//! use confmap_runtime::{Flattener, config::FlattenConfig};
//!
//! let rendered = Flattener::new(FlattenConfig::default()).flatten_file("connector.yaml")?;
//! if rendered.is_drifted(&applied_fingerprint) {
//!     rendered.write_to("application.properties")?;
//! }
//! ```

use std::path::{Path, PathBuf};

use confmap_core::{Document, Mappable, Mapping, MappingResult};
use figment::Figment;
use figment::providers::{Format, Json};
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::FlattenConfig;
use crate::error::{RuntimeError, RuntimeResult};

/// Canonical properties text and its fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Sorted, newline-joined `key=value` lines.
    pub properties: String,
    /// MD5 of `properties`, 32 lowercase hex characters.
    pub fingerprint: String,
}

impl Rendered {
    /// Renders a mapping.
    ///
    /// # Errors
    ///
    /// Fails when a relative and an absolute key collide, since the
    /// rendered text would otherwise carry the same property twice.
    pub fn from_mapping(config: &Mapping) -> MappingResult<Self> {
        config.as_simple_map()?;
        Ok(Self {
            properties: config.serialize(),
            fingerprint: config.fingerprint(),
        })
    }

    /// Returns `true` when `applied` differs from this fingerprint.
    pub fn is_drifted(&self, applied: &str) -> bool {
        !self.fingerprint.eq_ignore_ascii_case(applied.trim())
    }

    /// Writes the properties text to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> RuntimeResult<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.properties).map_err(|source| RuntimeError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), fingerprint = %self.fingerprint, "Wrote properties");
        Ok(())
    }
}

/// Flattens documents according to a [`FlattenConfig`].
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    /// Creates a flattener.
    pub fn new(config: FlattenConfig) -> Self {
        Self { config }
    }

    /// Returns the flattening settings.
    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Flattens a document into a mapping.
    ///
    /// Top-level fields listed in `exclude` are skipped, and `overrides`
    /// are written last as absolute keys.
    pub fn flatten_value(&self, value: &Value) -> Mapping {
        let mut config = match &self.config.prefix {
            Some(prefix) => Mapping::prefixed(prefix.as_str()),
            None => Mapping::new(),
        };
        let item_prefix = self.config.list_item_prefix.as_str();

        match value {
            Value::Object(fields) => {
                for (name, field) in fields {
                    if self.config.exclude.iter().any(|excluded| excluded == name) {
                        debug!(field = %name, "Excluding document field");
                        continue;
                    }
                    config.put_mappable(name, &Document::new(field).item_prefix(item_prefix));
                }
            }
            _ => {
                config.merge_mappable(&Document::new(value).item_prefix(item_prefix));
            }
        }

        for (name, value) in &self.config.overrides {
            config.put_absolute(name, value);
        }

        config
    }

    /// Flattens and renders a document.
    pub fn render_value(&self, value: &Value) -> RuntimeResult<Rendered> {
        Ok(Rendered::from_mapping(&self.flatten_value(value))?)
    }

    /// Flattens an object that describes itself, applying the same prefix
    /// and overrides as documents.
    pub fn render_mappable<M: Mappable + ?Sized>(&self, item: &M) -> RuntimeResult<Rendered> {
        let mut config = match &self.config.prefix {
            Some(prefix) => Mapping::prefixed(prefix.as_str()),
            None => Mapping::new(),
        };
        config.merge_mappable(item);
        for (name, value) in &self.config.overrides {
            config.put_absolute(name, value);
        }
        Ok(Rendered::from_mapping(&config)?)
    }

    /// Reads, flattens and renders a document file.
    ///
    /// The format follows the extension: `.json` always, `.toml` and
    /// `.yaml`/`.yml` with the matching feature.
    pub fn flatten_file<P: AsRef<Path>>(&self, path: P) -> RuntimeResult<Rendered> {
        let path = path.as_ref();
        let value = read_document(path)?;
        let rendered = self.render_value(&value)?;

        debug!(
            path = %path.display(),
            fingerprint = %rendered.fingerprint,
            "Flattened document"
        );
        Ok(rendered)
    }
}

/// Reads a structured document through the figment provider for its format.
pub fn read_document(path: &Path) -> RuntimeResult<Value> {
    if !path.exists() {
        return Err(RuntimeError::DocumentNotFound(PathBuf::from(path)));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let figment = match ext {
        "json" => Figment::from(Json::file(path)),
        #[cfg(feature = "toml-config")]
        "toml" => Figment::from(Toml::file(path)),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Figment::from(Yaml::file(path)),
        _ => {
            return Err(RuntimeError::document(
                path,
                format!("unsupported or disabled document format: .{ext}"),
            ));
        }
    };

    figment
        .extract::<Value>()
        .map_err(|err| RuntimeError::document(path, err))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use confmap_core::MappingError;
    use figment::Jail;
    use serde_json::json;

    use super::*;

    fn flattener(prefix: Option<&str>) -> Flattener {
        Flattener::new(FlattenConfig {
            prefix: prefix.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_flatten_with_prefix_and_item_names() {
        let doc = json!({
            "connector": { "class": "postgres" },
            "sinks": [{ "type": "kafka" }, { "type": "http" }],
            "tags": ["a", "b"],
        });

        let config = flattener(Some("debezium")).flatten_value(&doc);
        assert_eq!(
            config.serialize(),
            [
                "debezium.connector.class=postgres",
                "debezium.sinks.item0.type=kafka",
                "debezium.sinks.item1.type=http",
                "debezium.sinks=item0,item1",
                "debezium.tags=a,b",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_exclude_and_overrides() {
        let flattener = Flattener::new(FlattenConfig {
            prefix: Some("app".into()),
            exclude: vec!["status".into()],
            overrides: BTreeMap::from([("quarkus.log.level".into(), "DEBUG".into())]),
            ..Default::default()
        });

        let doc = json!({ "name": "x", "status": { "ready": true } });
        assert_eq!(
            flattener.flatten_value(&doc).serialize(),
            "app.name=x\nquarkus.log.level=DEBUG"
        );
    }

    #[test]
    fn test_override_colliding_with_document_key() {
        let flattener = Flattener::new(FlattenConfig {
            overrides: BTreeMap::from([("db.port".into(), "1".into())]),
            ..Default::default()
        });

        let err = flattener
            .render_value(&json!({ "db": { "port": 5432 } }))
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Mapping(MappingError::DuplicateKey { ref key }) if key == "db.port"
        ));
    }

    #[test]
    fn test_scalar_document_is_root() {
        let config = flattener(Some("value")).flatten_value(&json!("x"));
        assert_eq!(config.serialize(), "value=x");
    }

    #[test]
    fn test_render_mappable_matches_document() {
        let doc = json!({ "a": { "b": 1 } });
        let flattener = flattener(Some("p"));

        let from_document = flattener.render_value(&doc).unwrap();
        let from_mapping = flattener
            .render_mappable(&Mapping::from_properties([("a.b", 1)]))
            .unwrap();
        assert_eq!(from_document, from_mapping);
    }

    #[test]
    fn test_drift() {
        let rendered = flattener(None).render_value(&json!({ "k": "v" })).unwrap();
        assert_eq!(rendered.properties, "k=v");
        assert!(!rendered.is_drifted(&rendered.fingerprint));
        assert!(!rendered.is_drifted(&format!(" {} ", rendered.fingerprint.to_uppercase())));
        assert!(rendered.is_drifted("d41d8cd98f00b204e9800998ecf8427e"));
    }

    #[test]
    fn test_flatten_json_file_and_write() {
        Jail::expect_with(|jail| {
            jail.create_file("doc.json", r#"{ "db": { "host": "h", "port": 1 } }"#)?;

            let rendered = flattener(Some("app"))
                .flatten_file(jail.directory().join("doc.json"))
                .map_err(|e| e.to_string())?;
            assert_eq!(rendered.properties, "app.db.host=h\napp.db.port=1");

            let out = jail.directory().join("app.properties");
            rendered.write_to(&out).map_err(|e| e.to_string())?;
            let written = std::fs::read_to_string(&out).map_err(|e| e.to_string())?;
            assert_eq!(written, rendered.properties);
            Ok(())
        });
    }

    #[cfg(feature = "toml-config")]
    #[test]
    fn test_flatten_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "doc.toml",
                r#"
                [source]
                class = "mysql"
                tables = ["a", "b"]
                "#,
            )?;

            let rendered = flattener(None)
                .flatten_file(jail.directory().join("doc.toml"))
                .map_err(|e| e.to_string())?;
            assert_eq!(rendered.properties, "source.class=mysql\nsource.tables=a,b");
            Ok(())
        });
    }

    #[test]
    fn test_missing_and_unsupported_documents() {
        Jail::expect_with(|jail| {
            let missing = flattener(None).flatten_file(jail.directory().join("nope.json"));
            assert!(matches!(missing, Err(RuntimeError::DocumentNotFound(_))));

            jail.create_file("doc.ini", "a=b")?;
            let unsupported = flattener(None).flatten_file(jail.directory().join("doc.ini"));
            assert!(matches!(unsupported, Err(RuntimeError::Document { .. })));
            Ok(())
        });
    }
}
