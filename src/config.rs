//! Serializer settings, loadable from YAML or JSON.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};
use thiserror::Error;

use crate::errors::{ErrorKind, InpError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Column limit for one physical line.
    pub line_width: usize,
    /// Blanks that open a continuation line; MCNP needs at least five.
    pub continuation_indent: usize,
    /// Reuse a parsed card's line breaks when its word count is unchanged.
    pub preserve_layout: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            line_width: 80,
            continuation_indent: 5,
            preserve_layout: true,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    #[diagnostic(code(inp::config::io))]
    Io(#[from] io::Error),
    #[error("invalid YAML config: {0}")]
    #[diagnostic(code(inp::config::yaml))]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    #[diagnostic(code(inp::config::json))]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    #[diagnostic(code(inp::config::invalid))]
    Invalid(#[from] InpError),
}

impl FormatConfig {
    /// Loads a config; `.json` files are JSON, anything else is YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => serde_json::from_str(&text)?,
            _ => serde_yaml::from_str(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InpError> {
        if self.continuation_indent < 5 {
            return Err(self.invalid(
                "continuation_indent",
                self.continuation_indent,
                ">= 5",
            ));
        }
        if self.line_width <= self.continuation_indent + 1 {
            return Err(self.invalid(
                "line_width",
                self.line_width,
                &format!("> {}", self.continuation_indent + 1),
            ));
        }
        Ok(())
    }

    fn invalid(&self, field: &str, value: usize, expected: &str) -> InpError {
        InpError::new(ErrorKind::OutOfRange {
            keyword: "config".into(),
            field: field.into(),
            value: value.to_string(),
            expected: expected.into(),
        })
    }
}
