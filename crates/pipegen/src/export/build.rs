use indexmap::IndexMap;

use crate::pipeline::PipelineConfig;

use super::types::{
    AssemblyEntry, AssemblyTable, BUNDLE_VERSION, Backoff, DeploymentBundle, HealthCheck,
    LoadBalancing, ModuleRef, RetryPolicy, SchedulerConfig,
};

pub const LOAD_BALANCING_STRATEGY: &str = "weighted-round-robin";
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
pub const BACKOFF_KIND: &str = "exponential";
pub const BACKOFF_INITIAL_DELAY_MS: u64 = 1_000;
pub const HEALTH_CHECK_INTERVAL_MS: u64 = 30_000;
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 5_000;
pub const MAX_CONCURRENT: u32 = 100;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Module kind of the routing stage at the head of every pipeline.
pub const LLMSWITCH_KIND: &str = "llmswitch-openai-openai";
const DEFAULT_WEIGHT: u32 = 1;

/// Per-pipeline module chain: llmswitch → workflow → compatibility → provider.
pub fn build_assembly_table(pipelines: &[PipelineConfig]) -> AssemblyTable {
    let module = |stage: &str, kind: &str| ModuleRef {
        stage: stage.to_string(),
        kind: kind.to_string(),
    };
    AssemblyTable {
        pipelines: pipelines
            .iter()
            .map(|p| AssemblyEntry {
                id: p.id.clone(),
                name: format!("{}/{}", p.provider_id(), p.model_id()),
                modules: vec![
                    module("llmswitch", LLMSWITCH_KIND),
                    module("workflow", &p.workflow.kind),
                    module("compatibility", &p.compatibility.kind),
                    module("provider", &p.provider.provider_type),
                ],
            })
            .collect(),
    }
}

/// Fixed scheduler defaults with an equal weight for every pipeline.
pub fn build_scheduler_config(pipelines: &[PipelineConfig]) -> SchedulerConfig {
    SchedulerConfig {
        load_balancing: LoadBalancing {
            strategy: LOAD_BALANCING_STRATEGY.to_string(),
            weights: pipelines
                .iter()
                .map(|p| (p.id.clone(), DEFAULT_WEIGHT))
                .collect(),
        },
        retry: RetryPolicy {
            max_attempts: RETRY_MAX_ATTEMPTS,
            backoff: Backoff {
                kind: BACKOFF_KIND.to_string(),
                initial_delay_ms: BACKOFF_INITIAL_DELAY_MS,
            },
        },
        health_check: HealthCheck {
            enabled: true,
            interval_ms: HEALTH_CHECK_INTERVAL_MS,
            timeout_ms: HEALTH_CHECK_TIMEOUT_MS,
        },
        max_concurrent: MAX_CONCURRENT,
        default_timeout_ms: DEFAULT_TIMEOUT_MS,
    }
}

/// Virtual model → pipeline ids, aliases in first-seen order.
pub fn build_routing_table(pipelines: &[PipelineConfig]) -> IndexMap<String, Vec<String>> {
    let mut routing: IndexMap<String, Vec<String>> = IndexMap::new();
    for p in pipelines {
        for name in &p.virtual_models {
            routing.entry(name.clone()).or_default().push(p.id.clone());
        }
    }
    routing
}

pub fn build_bundle(pipelines: &[PipelineConfig]) -> DeploymentBundle {
    DeploymentBundle {
        version: BUNDLE_VERSION.to_string(),
        pipelines: pipelines.to_vec(),
        routing: build_routing_table(pipelines),
        assembly: build_assembly_table(pipelines),
        scheduler: build_scheduler_config(pipelines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_user_config;

    fn pipelines() -> Vec<PipelineConfig> {
        parse_user_config(
            &serde_json::from_str(
                r#"{ "providers": {
                    "openai": { "models": { "gpt-4": { "keys": ["k1", "k2"] } } },
                    "anthropic": { "models": { "claude": { "keys": ["k3"] } } }
                },
                "virtualModels": { "assistant": { "targetProvider": "openai", "targetModel": "gpt-4" } } }"#,
            )
            .unwrap(),
        )
        .pipelines
    }

    #[test]
    fn assembly_lists_module_chain_per_pipeline() {
        let table = build_assembly_table(&pipelines());
        assert_eq!(table.pipelines.len(), 3);
        let row = &table.pipelines[2];
        assert_eq!(row.id, "anthropic.claude.0");
        assert_eq!(row.name, "anthropic/claude");
        let kinds: Vec<_> = row.modules.iter().map(|m| m.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec![LLMSWITCH_KIND, "streaming-control", "passthrough", "anthropic"]
        );
    }

    #[test]
    fn scheduler_uses_fixed_defaults() {
        let sched = build_scheduler_config(&pipelines());
        assert_eq!(sched.retry.max_attempts, 3);
        assert_eq!(sched.retry.backoff.initial_delay_ms, 1000);
        assert_eq!(sched.health_check.interval_ms, 30_000);
        assert_eq!(sched.health_check.timeout_ms, 5_000);
        assert_eq!(sched.max_concurrent, 100);
        assert_eq!(sched.default_timeout_ms, 30_000);
        assert_eq!(sched.load_balancing.weights.len(), 3);
        assert_eq!(sched.load_balancing.weights["openai.gpt-4.1"], 1);
    }

    #[test]
    fn routing_maps_aliases_to_pipeline_ids() {
        let routing = build_routing_table(&pipelines());
        assert_eq!(
            routing.keys().collect::<Vec<_>>(),
            vec!["assistant", "anthropic-claude"]
        );
        assert_eq!(routing["assistant"], vec!["openai.gpt-4.0", "openai.gpt-4.1"]);
        assert_eq!(routing["anthropic-claude"], vec!["anthropic.claude.0"]);
    }

    #[test]
    fn bundle_is_deterministic() {
        let ps = pipelines();
        assert_eq!(build_bundle(&ps), build_bundle(&ps));
        assert_eq!(build_bundle(&ps).version, BUNDLE_VERSION);
    }
}
