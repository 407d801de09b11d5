use std::collections::HashSet;

use crate::pipeline::{PipelineConfig, Statistics};

/// Counts over whatever list is passed in; pre- or post-merge is the caller's choice.
pub fn collect_statistics(pipelines: &[PipelineConfig]) -> Statistics {
    let providers: HashSet<&str> = pipelines.iter().map(|p| p.provider_id()).collect();
    let models: HashSet<(&str, &str)> = pipelines
        .iter()
        .map(|p| (p.provider_id(), p.model_id()))
        .collect();
    Statistics {
        total_pipelines: pipelines.len(),
        total_providers: providers.len(),
        total_models: models.len(),
        total_keys: pipelines.iter().map(|p| p.keys().len()).sum(),
    }
}
