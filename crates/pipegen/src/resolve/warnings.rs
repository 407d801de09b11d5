//! Non-fatal findings: dropped aliases, unused aliases, scale, duplicated keys.

use std::fmt;

use indexmap::IndexMap;

use crate::pipeline::PipelineConfig;
use crate::schema::VirtualModelSpec;

/// Pipeline count above which a scale warning is emitted.
pub const SCALE_WARNING_THRESHOLD: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    Mapping,
    Unused,
    Scale,
    Duplication,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionWarning {
    /// Alias declared without a usable target; it was dropped.
    MissingTarget {
        virtual_model: String,
        missing: Vec<&'static str>,
    },
    /// Alias target matched no pipeline; it was dropped.
    UnmatchedTarget {
        virtual_model: String,
        provider: String,
        model: String,
    },
    /// Declared alias attached to no pipeline in the final set.
    UnusedVirtualModel { virtual_model: String },
    PipelineCount { count: usize, threshold: usize },
    /// Same key value found on `occurrences` distinct pipelines.
    DuplicateKey { masked_key: String, occurrences: usize },
}

impl ResolutionWarning {
    pub fn kind(&self) -> WarningKind {
        match self {
            ResolutionWarning::MissingTarget { .. } | ResolutionWarning::UnmatchedTarget { .. } => {
                WarningKind::Mapping
            }
            ResolutionWarning::UnusedVirtualModel { .. } => WarningKind::Unused,
            ResolutionWarning::PipelineCount { .. } => WarningKind::Scale,
            ResolutionWarning::DuplicateKey { .. } => WarningKind::Duplication,
        }
    }
}

impl fmt::Display for ResolutionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionWarning::MissingTarget {
                virtual_model,
                missing,
            } => write!(
                f,
                "virtual model '{}' is missing {}; skipped",
                virtual_model,
                missing.join(" and ")
            ),
            ResolutionWarning::UnmatchedTarget {
                virtual_model,
                provider,
                model,
            } => write!(
                f,
                "no pipeline for virtual model '{}' (target {}/{}); skipped",
                virtual_model, provider, model
            ),
            ResolutionWarning::UnusedVirtualModel { virtual_model } => {
                write!(f, "unused virtual model '{}'", virtual_model)
            }
            ResolutionWarning::PipelineCount { count, threshold } => write!(
                f,
                "{} pipelines generated (more than {}); consider merging",
                count, threshold
            ),
            ResolutionWarning::DuplicateKey {
                masked_key,
                occurrences,
            } => write!(
                f,
                "api key {} is used by {} pipelines",
                masked_key, occurrences
            ),
        }
    }
}

/// Scan the final pipeline set against the declared aliases.
pub fn analyze(
    pipelines: &[PipelineConfig],
    declared: &IndexMap<String, VirtualModelSpec>,
) -> Vec<ResolutionWarning> {
    let mut out = Vec::new();

    for name in declared.keys() {
        if !pipelines.iter().any(|p| p.has_virtual_model(name)) {
            out.push(ResolutionWarning::UnusedVirtualModel {
                virtual_model: name.clone(),
            });
        }
    }

    if pipelines.len() > SCALE_WARNING_THRESHOLD {
        out.push(ResolutionWarning::PipelineCount {
            count: pipelines.len(),
            threshold: SCALE_WARNING_THRESHOLD,
        });
    }

    let mut usage: IndexMap<&str, usize> = IndexMap::new();
    for p in pipelines {
        let mut seen: Vec<&str> = Vec::new();
        for key in p.keys().iter().map(String::as_str) {
            if !seen.contains(&key) {
                seen.push(key);
                *usage.entry(key).or_insert(0) += 1;
            }
        }
    }
    for (key, occurrences) in usage {
        if occurrences >= 2 {
            out.push(ResolutionWarning::DuplicateKey {
                masked_key: mask_key(key),
                occurrences,
            });
        }
    }

    out
}

/// Keep at most the first four characters of a key for display.
pub fn mask_key(key: &str) -> String {
    if key.chars().count() <= 4 {
        return "****".to_string();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::{into_user_config, resolve_pipelines};

    fn pipelines(json: &str) -> Vec<PipelineConfig> {
        let cfg = into_user_config(&serde_json::from_str(json).unwrap()).unwrap();
        resolve_pipelines(&cfg)
    }

    #[test]
    fn masks_keys() {
        assert_eq!(mask_key("sk-abcdef"), "sk-a****");
        assert_eq!(mask_key("abc"), "****");
    }

    #[test]
    fn reports_unused_alias() {
        let ps = pipelines(r#"{ "providers": { "openai": { "models": { "gpt-4": { "keys": ["k1"] } } } } }"#);
        let mut declared = IndexMap::new();
        declared.insert("ghost".to_string(), VirtualModelSpec::default());
        let warnings = analyze(&ps, &declared);
        assert_eq!(
            warnings,
            vec![ResolutionWarning::UnusedVirtualModel {
                virtual_model: "ghost".into()
            }]
        );
        assert_eq!(warnings[0].kind(), WarningKind::Unused);
        assert!(warnings[0].to_string().contains("ghost"));
    }

    #[test]
    fn reports_keys_shared_across_pipelines() {
        let ps = pipelines(
            r#"{ "providers": {
                "openai": { "models": { "gpt-4": { "keys": ["shared-key", "solo-key"] } } },
                "proxy": { "models": { "gpt-4": { "keys": ["shared-key"] }, "gpt-4o": { "keys": ["shared-key"] } } }
            } }"#,
        );
        let warnings = analyze(&ps, &IndexMap::new());
        assert_eq!(
            warnings,
            vec![ResolutionWarning::DuplicateKey {
                masked_key: "shar****".into(),
                occurrences: 3
            }]
        );
        assert!(warnings[0].to_string().contains("3 pipelines"));
    }

    #[test]
    fn scale_warning_only_above_threshold() {
        let keys: Vec<String> = (0..SCALE_WARNING_THRESHOLD).map(|i| format!("key-{i}")).collect();
        let json = serde_json::json!({ "providers": { "p": { "models": { "m": { "keys": keys } } } } });
        let ps = pipelines(&json.to_string());
        assert!(analyze(&ps, &IndexMap::new()).is_empty());

        let keys: Vec<String> = (0..=SCALE_WARNING_THRESHOLD).map(|i| format!("key-{i}")).collect();
        let json = serde_json::json!({ "providers": { "p": { "models": { "m": { "keys": keys } } } } });
        let ps = pipelines(&json.to_string());
        let warnings = analyze(&ps, &IndexMap::new());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind(), WarningKind::Scale);
    }
}
