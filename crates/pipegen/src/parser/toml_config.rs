//! Parser for `.toml` configs.
//!
//! Requires toml's `preserve_order` feature so tables keep declaration order.

use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::RawUserConfig;

use super::{ConfigFormatParser, has_extension};

pub struct TomlConfigParser;

impl ConfigFormatParser for TomlConfigParser {
    fn supports(path: &Path) -> bool {
        has_extension(path, &["toml"])
    }

    fn parse(content: &str, path: &Path) -> Result<RawUserConfig> {
        toml::from_str(content).map_err(|e| Error::parse(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_table_order_and_camel_case_keys() {
        let content = r#"
[providers.zeta.models.m]
keys = ["k1"]

[providers.alpha]
type = "anthropic"

[providers.alpha.models.claude]
keys = ["k2", "k3"]

[virtualModels.writer]
targetProvider = "alpha"
targetModel = "claude"
"#;
        let cfg = TomlConfigParser::parse(content, Path::new("c.toml")).expect("parse ok");
        let providers = cfg.providers.unwrap();
        assert_eq!(providers.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(providers["alpha"].provider_type.as_deref(), Some("anthropic"));
        let vms = cfg.virtual_models.unwrap();
        assert_eq!(vms["writer"].target_provider.as_deref(), Some("alpha"));
    }
}
