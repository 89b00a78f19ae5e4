//! Shared configuration loader for wiregram pipelines.
//!
//! `defaults/wiregram.default.toml` is embedded into every build so that docs and
//! runtime behavior stay in sync. Hosts layer user-specific files, `WIREGRAM__*`
//! environment variables and explicit overrides on top of those defaults via
//! [`Loader`] before deserializing into [`WireGramConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/wiregram.default.toml");

/// Top-level configuration consumed by wiregram hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct WireGramConfig {
    pub logging: LoggingConfig,
    pub streaming: StreamingConfig,
    pub languages: LanguagesConfig,
}

/// Subscriber settings used by `wiregram::logging::init`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive string.
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Knobs for bounded-window token sources.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamingConfig {
    pub window_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguagesConfig {
    pub expression: ExpressionConfig,
}

/// Options for the reference expression front end.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpressionConfig {
    pub preserve_raw_literals: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `WIREGRAM__SECTION__KEY` style environment variables.
    pub fn with_env(mut self) -> Self {
        let source = Environment::with_prefix("WIREGRAM")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<WireGramConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<WireGramConfig, ConfigError> {
    Loader::new().build()
}
