//! Configuration loader for tmark.
//!
//! `defaults/tmark.default.toml` is embedded into the crate so that docs and runtime behavior
//! stay in sync. Callers layer their own files and overrides on top of those defaults via
//! [`Loader`] before deserializing into [`TmarkConfig`].

use crate::tmark::parsing::ParserOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/tmark.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TmarkConfig {
    pub parser: ParserConfig,
    pub lexer: LexerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    pub indent_width: usize,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LexerConfig {
    pub max_peek_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub truncate: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Tree,
    Json,
    Yaml,
}

impl TmarkConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("parser.indent_width", self.parser.indent_width),
            ("parser.max_depth", self.parser.max_depth),
            ("lexer.max_peek_count", self.lexer.max_peek_count),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Message(format!("{key} must be at least 1")));
            }
        }
        Ok(())
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            indent_width: self.parser.indent_width,
            max_depth: self.parser.max_depth,
            max_peek_count: self.lexer.max_peek_count,
        }
    }
}

/// Builds a [TmarkConfig] from the embedded defaults plus any user files and CLI overrides.
///
/// Later layers win. [Loader::build] rejects zero values for the numeric parser and lexer
/// limits, which [Parser](crate::tmark::Parser) cannot run with.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only `defaults/tmark.default.toml` so far.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist, e.g. one named with `--config`.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Add a TOML file that may be absent, e.g. a per-user config.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key such as `output.format`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Deserialize the layered sources, rejecting values the parser cannot run with.
    pub fn build(self) -> Result<TmarkConfig, ConfigError> {
        let config: TmarkConfig = self.builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<TmarkConfig, ConfigError> {
    Loader::new().build()
}
