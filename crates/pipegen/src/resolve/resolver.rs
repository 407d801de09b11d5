//! Expand providers × models × keys into pipeline records.

use crate::pipeline::{
    AUTH_TYPE_API_KEY, AuthConfig, LlmSwitch, PipelineConfig, ProviderRuntime, StageConfig,
    pipeline_id,
};
use crate::schema::{ProviderSpec, UserConfig, infer_endpoint, infer_provider_type};

/// Resolve every `(provider, model, key_index)` triple in declaration order.
pub fn resolve_pipelines(config: &UserConfig) -> Vec<PipelineConfig> {
    let mut out = Vec::with_capacity(config.key_count());
    for (provider_id, provider) in &config.providers {
        out.extend(resolve_provider(provider_id, provider));
    }
    out
}

/// Pipelines for a single provider. Output depends only on the arguments, so
/// providers can be resolved independently and concatenated.
pub fn resolve_provider(provider_id: &str, provider: &ProviderSpec) -> Vec<PipelineConfig> {
    let provider_type = infer_provider_type(provider_id, provider.provider_type.as_deref());
    let endpoint = infer_endpoint(&provider_type, provider.endpoint.as_deref());
    let name = provider
        .name
        .clone()
        .unwrap_or_else(|| provider_id.to_string());

    let mut out = Vec::new();
    for (model_id, model) in &provider.models {
        for (key_index, key) in model.keys.iter().enumerate() {
            out.push(PipelineConfig {
                id: pipeline_id(provider_id, model_id, key_index),
                llmswitch: LlmSwitch {
                    provider: provider_id.to_string(),
                    model: model_id.clone(),
                    key_index,
                },
                virtual_models: Vec::new(),
                provider: ProviderRuntime {
                    id: provider_id.to_string(),
                    name: name.clone(),
                    provider_type: provider_type.clone(),
                    endpoint: endpoint.clone(),
                    models: vec![model_id.clone()],
                    auth: AuthConfig {
                        auth_type: AUTH_TYPE_API_KEY.to_string(),
                        keys: vec![key.clone()],
                    },
                    enabled: provider.enabled,
                },
                workflow: StageConfig::workflow_default(),
                compatibility: StageConfig::compatibility_default(),
            });
        }
    }
    tracing::debug!(
        "resolved provider '{}' (type={}, pipelines={})",
        provider_id,
        provider_type,
        out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::into_user_config;

    fn config(json: &str) -> UserConfig {
        into_user_config(&serde_json::from_str(json).unwrap()).expect("valid config")
    }

    #[test]
    fn one_pipeline_per_key_in_declaration_order() {
        let cfg = config(
            r#"{ "providers": {
                "openai": { "models": { "gpt-4": { "keys": ["k1", "k2"] }, "gpt-4o": { "keys": ["k3"] } } },
                "anthropic": { "models": { "claude": { "keys": ["k4"] } } }
            } }"#,
        );
        let ids: Vec<_> = resolve_pipelines(&cfg).into_iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                "openai.gpt-4.0",
                "openai.gpt-4.1",
                "openai.gpt-4o.0",
                "anthropic.claude.0"
            ]
        );
    }

    #[test]
    fn snapshot_is_scoped_to_one_model_and_one_key() {
        let cfg = config(
            r#"{ "providers": { "openai": { "models": {
                "gpt-4": { "keys": ["k1", "k2"] }, "gpt-4o": { "keys": ["k3"] } } } } }"#,
        );
        let pipelines = resolve_pipelines(&cfg);
        let second = &pipelines[1];
        assert_eq!(second.llmswitch.key_index, 1);
        assert_eq!(second.provider.models, vec!["gpt-4"]);
        assert_eq!(second.keys(), &["k2".to_string()]);
        assert_eq!(second.provider.auth.auth_type, "apiKey");
        assert_eq!(second.provider.provider_type, "openai");
        assert_eq!(second.provider.endpoint, "https://api.openai.com/v1");
        assert!(second.virtual_models.is_empty());
        assert_eq!(second.workflow, StageConfig::workflow_default());
        assert_eq!(second.compatibility, StageConfig::compatibility_default());
    }

    #[test]
    fn explicit_provider_fields_are_carried() {
        let cfg = config(
            r#"{ "providers": { "corp": {
                "type": "azure", "endpoint": "https://corp.example/v1", "name": "Corp", "enabled": false,
                "models": { "m": { "keys": ["k"] } } } } }"#,
        );
        let p = &resolve_pipelines(&cfg)[0];
        assert_eq!(p.provider.name, "Corp");
        assert_eq!(p.provider.provider_type, "azure");
        assert_eq!(p.provider.endpoint, "https://corp.example/v1");
        assert!(!p.provider.enabled);
    }
}
