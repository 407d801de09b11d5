//! Config sources: where a `RawUserConfig` comes from.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::parser::parse_for_path;
use crate::schema::RawUserConfig;

/// Supplies the raw config for one resolution pass.
pub trait ConfigSource {
    fn load(&self) -> Result<RawUserConfig>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Reads a `.json`, `.toml`, `.yaml` or `.yml` file.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfigSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<RawUserConfig> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_for_path(&content, &self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Hands out an in-memory config.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    config: RawUserConfig,
}

impl StaticConfigSource {
    pub fn new(config: RawUserConfig) -> Self {
        StaticConfigSource { config }
    }
}

impl ConfigSource for StaticConfigSource {
    fn load(&self) -> Result<RawUserConfig> {
        Ok(self.config.clone())
    }

    fn describe(&self) -> String {
        "in-memory config".to_string()
    }
}
