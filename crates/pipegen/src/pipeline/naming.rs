//! Identifier grammar for pipelines and synthesized virtual models.
//!
//! Pipeline ids are dot-delimited; default virtual-model names are
//! hyphen-delimited. Both forms are part of the external contract.

/// Suffix used in place of a key index once a group has been merged.
pub const MERGED_SUFFIX: &str = "merged";

/// `{provider}.{model}.{key_index}`
pub fn pipeline_id(provider: &str, model: &str, key_index: usize) -> String {
    format!("{}.{}.{}", provider, model, key_index)
}

/// `{provider}.{model}.merged`
pub fn merged_pipeline_id(provider: &str, model: &str) -> String {
    format!("{}.{}.{}", provider, model, MERGED_SUFFIX)
}

/// `{provider}-{model}`: alias assigned to pipelines no virtual model targets.
pub fn default_virtual_model(provider: &str, model: &str) -> String {
    format!("{}-{}", provider, model)
}
