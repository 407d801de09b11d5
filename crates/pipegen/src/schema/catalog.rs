//! Known provider families and their default endpoints.

/// Provider type used when a provider id is not in the catalog and the
/// config does not set `type`.
pub const OPENAI_COMPATIBLE: &str = "openai-compatible";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDefaults {
    pub provider_type: &'static str,
    pub endpoint: &'static str,
}

const CATALOG: &[(&str, ProviderDefaults)] = &[
    ("openai", mk("openai", "https://api.openai.com/v1")),
    ("anthropic", mk("anthropic", "https://api.anthropic.com/v1")),
    ("claude", mk("anthropic", "https://api.anthropic.com/v1")),
    ("gemini", mk("gemini", "https://generativelanguage.googleapis.com/v1beta")),
    ("google", mk("gemini", "https://generativelanguage.googleapis.com/v1beta")),
    ("deepseek", mk("deepseek", "https://api.deepseek.com/v1")),
    ("qwen", mk("qwen", "https://dashscope.aliyuncs.com/compatible-mode/v1")),
    ("openrouter", mk("openrouter", "https://openrouter.ai/api/v1")),
    ("groq", mk("groq", "https://api.groq.com/openai/v1")),
    ("ollama", mk("ollama", "http://localhost:11434/v1")),
    ("lmstudio", mk("lmstudio", "http://localhost:1234/v1")),
];

const fn mk(provider_type: &'static str, endpoint: &'static str) -> ProviderDefaults {
    ProviderDefaults {
        provider_type,
        endpoint,
    }
}

/// Catalog entry for a provider id or type name (case-insensitive).
pub fn lookup_provider(token: &str) -> Option<ProviderDefaults> {
    let key = token.trim().to_ascii_lowercase();
    CATALOG
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, defaults)| *defaults)
}

/// Provider type for a provider: explicit `type` wins, then the catalog
/// entry for the id, then `openai-compatible`.
pub fn infer_provider_type(provider_id: &str, explicit: Option<&str>) -> String {
    if let Some(t) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return t.to_string();
    }
    lookup_provider(provider_id)
        .map(|d| d.provider_type.to_string())
        .unwrap_or_else(|| OPENAI_COMPATIBLE.to_string())
}

/// Endpoint for a provider: explicit `endpoint` wins, then the catalog entry
/// for the resolved type, otherwise empty.
pub fn infer_endpoint(provider_type: &str, explicit: Option<&str>) -> String {
    if let Some(e) = explicit.map(str::trim).filter(|e| !e.is_empty()) {
        return e.to_string();
    }
    lookup_provider(provider_type)
        .map(|d| d.endpoint.to_string())
        .unwrap_or_default()
}
