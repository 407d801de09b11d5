//! Serialization of export artifacts.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    /// Tabular output. Not implemented yet; rendered as JSON.
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Render `value` in `format`.
pub fn render<T: Serialize>(value: &T, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| Error::Serialize(e.to_string()))
        }
        ExportFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| Error::Serialize(e.to_string()))
        }
        ExportFormat::Csv => {
            tracing::warn!("csv export is not implemented; falling back to json");
            render(value, ExportFormat::Json)
        }
    }
}

/// Parse `format` and render `value` with it.
pub fn render_named<T: Serialize>(value: &T, format: &str) -> Result<String> {
    render(value, format.parse()?)
}
