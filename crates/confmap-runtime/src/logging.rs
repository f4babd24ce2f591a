//! Logging setup for confmap, driven by [`LoggingConfig`].
//!
//! ```rust,ignore
//! use confmap_runtime::{config::load_config, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! Logs go to stderr unless configured otherwise, so that properties
//! printed on stdout can be piped as-is. `RUST_LOG` replaces the configured
//! level when set.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{Dispatch, Subscriber, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig};

/// Installs the global subscriber described by `config`.
///
/// A subscriber that is already installed is left in place.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

/// A filter directive that could not be parsed, with the parse error.
type Rejected = (String, String);

/// A builder for the confmap log subscriber.
#[derive(Debug)]
pub struct LoggingBuilder {
    level: tracing::Level,
    directives: Vec<String>,
    format: LogFormat,
    output: LogOutput,
    with_thread_ids: bool,
    with_file_location: bool,
    file_path: Option<PathBuf>,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// Compact `info` logging to stderr.
    pub fn new() -> Self {
        Self {
            level: tracing::Level::INFO,
            directives: Vec::new(),
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            with_thread_ids: false,
            with_file_location: false,
            file_path: None,
        }
    }

    /// Creates a builder from the `[logging]` configuration section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let directives = config
            .filters
            .iter()
            .map(|(module, level)| format!("{module}={level}"))
            .collect();

        Self {
            level: config.level.to_tracing_level(),
            directives,
            format: config.format,
            output: config.output,
            with_thread_ids: config.thread_ids,
            with_file_location: config.file_location,
            file_path: config.file_path.clone(),
        }
    }

    /// Sets the global log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive, e.g. `confmap_core=trace`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Builds the subscriber without installing it, for scoped use with
    /// [`tracing::dispatcher::with_default`].
    pub fn build(self) -> Dispatch {
        let (subscriber, rejected) = self.assemble();
        let dispatch = Dispatch::new(subscriber);
        tracing::dispatcher::with_default(&dispatch, || report_rejected(&rejected));
        dispatch
    }

    /// Installs the subscriber globally, failing if one is already set.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let (subscriber, rejected) = self.assemble();
        subscriber.try_init()?;
        report_rejected(&rejected);
        Ok(())
    }

    fn assemble(self) -> (impl Subscriber + Send + Sync + 'static, Vec<Rejected>) {
        let (filter, rejected) = self.build_filter();
        let layer = self.build_layer();
        let subscriber = tracing_subscriber::registry().with(layer).with(filter);
        (subscriber, rejected)
    }

    /// Builds the level filter. Directives that fail to parse are returned
    /// instead of logged, since no subscriber exists yet.
    fn build_filter(&self) -> (EnvFilter, Vec<Rejected>) {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string().to_lowercase()));
        let mut rejected = Vec::new();

        for directive in &self.directives {
            match directive.parse::<Directive>() {
                Ok(parsed) => filter = filter.add_directive(parsed),
                Err(err) => rejected.push((directive.clone(), err.to_string())),
            }
        }

        (filter, rejected)
    }

    fn build_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_writer(self.make_writer())
            .with_thread_ids(self.with_thread_ids)
            .with_file(self.with_file_location)
            .with_line_number(self.with_file_location);

        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json => layer.boxed(),
            LogFormat::Full => layer.boxed(),
        }
    }

    fn make_writer(&self) -> BoxMakeWriter {
        match (self.output, &self.file_path) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::File, Some(path)) => BoxMakeWriter::new(tracing_appender::rolling::never(
                path.parent().unwrap_or_else(|| Path::new(".")),
                path.file_name()
                    .unwrap_or_else(|| OsStr::new("confmap.log")),
            )),
            _ => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

fn report_rejected(rejected: &[Rejected]) {
    for (directive, error) in rejected {
        warn!(directive = %directive, error = %error, "Ignoring invalid log directive");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_builder_from_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            thread_ids: true,
            ..Default::default()
        };
        config
            .filters
            .insert("confmap_core".to_string(), LogLevel::Trace);

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, tracing::Level::DEBUG);
        assert_eq!(builder.directives, vec!["confmap_core=trace".to_string()]);
        assert!(builder.with_thread_ids);
        assert_eq!(builder.output, LogOutput::Stderr);
    }

    #[test]
    fn test_invalid_directives_are_collected() {
        let (_, rejected) = LoggingBuilder::new()
            .directive("confmap_core=loud")
            .directive("confmap_runtime=debug")
            .build_filter();

        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].0, "confmap_core=loud");
    }

    #[test]
    fn test_scoped_subscriber() {
        let dispatch = LoggingBuilder::new()
            .with_level(tracing::Level::DEBUG)
            .format(LogFormat::Pretty)
            .directive("confmap_core=loud")
            .build();

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::debug!("scoped subscriber active");
        });
    }
}
