use serde::{Deserialize, Serialize};

/// Auth type stamped on every provider snapshot.
pub const AUTH_TYPE_API_KEY: &str = "apiKey";
/// Static workflow stage kind.
pub const WORKFLOW_KIND: &str = "streaming-control";
/// Static compatibility stage kind.
pub const COMPATIBILITY_KIND: &str = "passthrough";

/// One independently addressable (provider, model, key) execution unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub id: String,
    pub llmswitch: LlmSwitch,
    /// Aliases routed to this pipeline; unique, in attachment order.
    pub virtual_models: Vec<String>,
    pub provider: ProviderRuntime,
    pub workflow: StageConfig,
    pub compatibility: StageConfig,
}

/// Routing coordinates of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmSwitch {
    pub provider: String,
    pub model: String,
    pub key_index: usize,
}

/// Provider snapshot scoped to a single model (and, before merging, a single key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRuntime {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub endpoint: String,
    pub models: Vec<String>,
    pub auth: AuthConfig,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub keys: Vec<String>,
}

/// Workflow/compatibility stage settings. Copied verbatim into every pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
}

impl StageConfig {
    pub fn workflow_default() -> Self {
        StageConfig {
            kind: WORKFLOW_KIND.to_string(),
            enabled: true,
        }
    }

    pub fn compatibility_default() -> Self {
        StageConfig {
            kind: COMPATIBILITY_KIND.to_string(),
            enabled: true,
        }
    }
}

impl PipelineConfig {
    pub fn provider_id(&self) -> &str {
        &self.llmswitch.provider
    }

    pub fn model_id(&self) -> &str {
        &self.llmswitch.model
    }

    pub fn keys(&self) -> &[String] {
        &self.provider.auth.keys
    }

    pub fn has_virtual_model(&self, name: &str) -> bool {
        self.virtual_models.iter().any(|v| v == name)
    }

    /// Append `name` unless already present. Returns whether it was added.
    pub fn attach_virtual_model(&mut self, name: &str) -> bool {
        if self.has_virtual_model(name) {
            return false;
        }
        self.virtual_models.push(name.to_string());
        true
    }
}
