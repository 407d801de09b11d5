//! Config file parsers for the supported text formats.
//!
//! Each parser declares a `supports` predicate over file paths and a `parse`
//! function that returns the raw, not yet validated `RawUserConfig`.

use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::RawUserConfig;

/// Parser trait implemented by each config format.
pub trait ConfigFormatParser {
    fn supports(path: &Path) -> bool;
    fn parse(content: &str, path: &Path) -> Result<RawUserConfig>;
}

pub mod json_config;
pub mod toml_config;
pub mod yaml_config;

use json_config::JsonConfigParser;
use toml_config::TomlConfigParser;
use yaml_config::YamlConfigParser;

/// Parse `content` with the parser matching `path`'s extension.
pub fn parse_for_path(content: &str, path: &Path) -> Result<RawUserConfig> {
    if JsonConfigParser::supports(path) {
        JsonConfigParser::parse(content, path)
    } else if TomlConfigParser::supports(path) {
        TomlConfigParser::parse(content, path)
    } else if YamlConfigParser::supports(path) {
        YamlConfigParser::parse(content, path)
    } else {
        Err(Error::UnsupportedConfigFile(path.to_path_buf()))
    }
}

fn has_extension(path: &Path, wanted: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| wanted.iter().any(|w| ext.eq_ignore_ascii_case(w)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_extension() {
        let json = r#"{ "providers": { "p": { "models": { "m": { "keys": ["k"] } } } } }"#;
        let cfg = parse_for_path(json, Path::new("routes.JSON")).expect("json ok");
        assert!(cfg.providers.is_some());

        let toml = "[providers.p.models.m]\nkeys = [\"k\"]\n";
        let cfg = parse_for_path(toml, Path::new("routes.toml")).expect("toml ok");
        assert_eq!(cfg, parse_for_path(json, Path::new("x.json")).unwrap());

        let err = parse_for_path(json, Path::new("routes.ini")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfigFile(_)));
    }
}
