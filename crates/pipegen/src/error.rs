//! Crate-level error type for I/O, parsing, and export failures.
//!
//! Structural problems in a config are not reported here; they end up in
//! `ParseResult::errors` (see `resolve::validate`).

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported config file: {} (expected .json, .toml, .yaml or .yml)", .0.display())]
    UnsupportedConfigFile(PathBuf),

    #[error("unknown export format '{0}' (expected json, yaml or csv)")]
    UnknownFormat(String),

    #[error("failed to serialize export: {0}")]
    Serialize(String),
}

impl Error {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
