//! Shared configuration loader for the ptext tools.
//!
//! `defaults/ptext.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`PtextConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use ptext_markdown::formats::markdown::options::parse_bullet;
use ptext_markdown::{FormatError, MarkdownOptions};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/ptext.default.toml");

/// Top-level configuration consumed by ptext applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PtextConfig {
    pub markdown: MarkdownConfig,
    pub inspect: InspectConfig,
}

/// Mirrors the knobs exposed by the Markdown writer.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub list_indent: String,
    pub bullet: char,
    pub code_min_ticks: usize,
}

impl TryFrom<&MarkdownConfig> for MarkdownOptions {
    type Error = FormatError;

    fn try_from(config: &MarkdownConfig) -> Result<Self, Self::Error> {
        if config.list_indent.is_empty() {
            return Err(FormatError::InvalidOption {
                option: "markdown.list_indent".to_string(),
                value: String::new(),
            });
        }
        let mut options = MarkdownOptions::default();
        options.list_indent = config.list_indent.clone();
        options.bullet = parse_bullet(&config.bullet.to_string())?;
        options.code_min_ticks = config.code_min_ticks.max(1);
        Ok(options)
    }
}

/// Controls inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub show_keys: bool,
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PtextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PtextConfig, ConfigError> {
    Loader::new().build()
}
