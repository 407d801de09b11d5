//! Parser for `.json` configs.

use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::RawUserConfig;

use super::{ConfigFormatParser, has_extension};

pub struct JsonConfigParser;

impl ConfigFormatParser for JsonConfigParser {
    fn supports(path: &Path) -> bool {
        has_extension(path, &["json"])
    }

    fn parse(content: &str, path: &Path) -> Result<RawUserConfig> {
        serde_json::from_str(content).map_err(|e| Error::parse(path, e))
    }
}
