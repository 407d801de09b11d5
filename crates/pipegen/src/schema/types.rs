use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Config as supplied by a source, before structural validation.
///
/// Every map is an `IndexMap`: declaration order drives pipeline order and is
/// part of the output contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<IndexMap<String, RawProvider>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_models: Option<IndexMap<String, RawVirtualModel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<IndexMap<String, RawModel>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVirtualModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_model: Option<String>,
}

/// Structurally valid configuration. Only `resolve::validate` builds these
/// from raw input, so every model here has at least one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserConfig {
    pub providers: IndexMap<String, ProviderSpec>,
    pub virtual_models: IndexMap<String, VirtualModelSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub provider_type: Option<String>,
    pub endpoint: Option<String>,
    pub name: Option<String>,
    pub enabled: bool,
    pub models: IndexMap<String, ModelSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub keys: Vec<String>,
}

/// Alias target. Fields stay optional: a missing target is a warning, not a
/// structural error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualModelSpec {
    pub target_provider: Option<String>,
    pub target_model: Option<String>,
}

impl UserConfig {
    /// Number of pipelines an unmerged resolution of this config produces.
    pub fn key_count(&self) -> usize {
        self.providers
            .values()
            .flat_map(|p| p.models.values())
            .map(|m| m.keys.len())
            .sum()
    }
}

impl VirtualModelSpec {
    /// Both target fields, if present and non-blank. Values are returned as
    /// written: matching against pipelines is exact.
    pub fn target(&self) -> Option<(&str, &str)> {
        let provider = self.target_provider.as_deref()?;
        let model = self.target_model.as_deref()?;
        if provider.trim().is_empty() || model.trim().is_empty() {
            return None;
        }
        Some((provider, model))
    }

    /// Names of the target fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or("").is_empty();
        let mut out = Vec::new();
        if blank(&self.target_provider) {
            out.push("targetProvider");
        }
        if blank(&self.target_model) {
            out.push("targetModel");
        }
        out
    }
}

impl From<&RawVirtualModel> for VirtualModelSpec {
    fn from(raw: &RawVirtualModel) -> Self {
        VirtualModelSpec {
            target_provider: raw.target_provider.clone(),
            target_model: raw.target_model.clone(),
        }
    }
}
