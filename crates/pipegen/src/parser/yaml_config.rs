//! Parser for `.yaml` / `.yml` configs.

use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::RawUserConfig;

use super::{ConfigFormatParser, has_extension};

pub struct YamlConfigParser;

impl ConfigFormatParser for YamlConfigParser {
    fn supports(path: &Path) -> bool {
        has_extension(path, &["yaml", "yml"])
    }

    fn parse(content: &str, path: &Path) -> Result<RawUserConfig> {
        serde_yaml::from_str(content).map_err(|e| Error::parse(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_maps() {
        let content = r#"
providers:
  openai:
    models:
      gpt-4:
        keys: [k1, k2]
virtualModels:
  assistant:
    targetProvider: openai
    targetModel: gpt-4
"#;
        let cfg = YamlConfigParser::parse(content, Path::new("c.yml")).expect("parse ok");
        let keys = cfg.providers.unwrap()["openai"].models.as_ref().unwrap()["gpt-4"]
            .keys
            .clone();
        assert_eq!(keys, Some(vec!["k1".to_string(), "k2".to_string()]));
        assert!(cfg.virtual_models.unwrap().contains_key("assistant"));
    }
}
