//! Attach virtual-model aliases to the pipelines they target.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::pipeline::{PipelineConfig, default_virtual_model};
use crate::schema::VirtualModelSpec;

use super::warnings::ResolutionWarning;

/// Positions of pipelines grouped by `(provider, model)`.
///
/// Built once per resolution pass from the resolver's output and never
/// mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct PipelineIndex {
    by_target: HashMap<(String, String), Vec<usize>>,
}

impl PipelineIndex {
    pub fn build(pipelines: &[PipelineConfig]) -> Self {
        let mut by_target: HashMap<(String, String), Vec<usize>> = HashMap::new();
        for (pos, p) in pipelines.iter().enumerate() {
            by_target
                .entry((p.provider_id().to_string(), p.model_id().to_string()))
                .or_default()
                .push(pos);
        }
        PipelineIndex { by_target }
    }

    /// Pipeline positions for a target, in pipeline order. Empty if unknown.
    pub fn lookup(&self, provider: &str, model: &str) -> &[usize] {
        self.by_target
            .get(&(provider.to_string(), model.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct `(provider, model)` targets.
    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}

/// Counters reported by [`map_virtual_models`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOutcome {
    /// Alias attachments made (one per alias per pipeline).
    pub attached: usize,
    /// Pipelines that received the synthesized default alias.
    pub defaulted: usize,
    pub warnings: Vec<ResolutionWarning>,
}

/// Attach every declared alias, then give each untouched pipeline its
/// `{provider}-{model}` default.
pub fn map_virtual_models(
    pipelines: &mut [PipelineConfig],
    virtual_models: &IndexMap<String, VirtualModelSpec>,
) -> MappingOutcome {
    let index = PipelineIndex::build(pipelines);
    let mut outcome = MappingOutcome::default();

    for (name, vm) in virtual_models {
        let Some((provider, model)) = vm.target() else {
            tracing::warn!("virtual model '{}' has no complete target; skipped", name);
            outcome.warnings.push(ResolutionWarning::MissingTarget {
                virtual_model: name.clone(),
                missing: vm.missing_fields(),
            });
            continue;
        };
        let matched = index.lookup(provider, model);
        if matched.is_empty() {
            tracing::warn!(
                "no pipeline for virtual model '{}' (target {}/{})",
                name,
                provider,
                model
            );
            outcome.warnings.push(ResolutionWarning::UnmatchedTarget {
                virtual_model: name.clone(),
                provider: provider.to_string(),
                model: model.to_string(),
            });
            continue;
        }
        for &pos in matched {
            if pipelines[pos].attach_virtual_model(name) {
                outcome.attached += 1;
            }
        }
        tracing::debug!(
            "virtual model '{}' -> {}/{} ({} pipeline(s))",
            name,
            provider,
            model,
            matched.len()
        );
    }

    outcome.defaulted = assign_default_virtual_models(pipelines);
    outcome
}

/// Second pass: synthesize `{provider}-{model}` on pipelines with no alias.
pub fn assign_default_virtual_models(pipelines: &mut [PipelineConfig]) -> usize {
    let mut assigned = 0;
    for p in pipelines.iter_mut() {
        if p.virtual_models.is_empty() {
            let name = default_virtual_model(p.provider_id(), p.model_id());
            p.virtual_models.push(name);
            assigned += 1;
        }
    }
    assigned
}
