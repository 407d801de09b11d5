//! Opt-in merge pass: one pipeline per `(provider, model)`.
//!
//! Merging trades per-key addressability for a smaller pipeline set. Callers
//! that need one pipeline per key use the unmerged list.

use indexmap::IndexMap;

use crate::pipeline::{PipelineConfig, merged_pipeline_id};

/// Group by `(provider, model)` in first-seen order and collapse each group
/// of two or more into a `{provider}.{model}.merged` pipeline.
///
/// The input is left untouched.
pub fn merge_pipelines(pipelines: &[PipelineConfig]) -> Vec<PipelineConfig> {
    let mut groups: IndexMap<(&str, &str), Vec<&PipelineConfig>> = IndexMap::new();
    for p in pipelines {
        groups
            .entry((p.provider_id(), p.model_id()))
            .or_default()
            .push(p);
    }

    let merged: Vec<PipelineConfig> = groups
        .into_iter()
        .map(|((provider, model), members)| merge_group(provider, model, &members))
        .collect();
    tracing::debug!(
        "merged {} pipeline(s) into {}",
        pipelines.len(),
        merged.len()
    );
    merged
}

fn merge_group(provider: &str, model: &str, members: &[&PipelineConfig]) -> PipelineConfig {
    let mut out = members[0].clone();
    if members.len() == 1 {
        return out;
    }

    out.id = merged_pipeline_id(provider, model);
    for member in &members[1..] {
        for name in &member.virtual_models {
            out.attach_virtual_model(name);
        }
        for key in member.keys() {
            if !out.provider.auth.keys.contains(key) {
                out.provider.auth.keys.push(key.clone());
            }
        }
    }
    out
}
