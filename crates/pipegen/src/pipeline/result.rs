use serde::{Deserialize, Serialize};

use super::PipelineConfig;

/// Aggregate counts over a pipeline list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_pipelines: usize,
    pub total_providers: usize,
    pub total_models: usize,
    pub total_keys: usize,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub success: bool,
    pub pipelines: Vec<PipelineConfig>,
    pub statistics: Statistics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl ParseResult {
    /// Failed result carrying `errors` (never empty for a failure).
    pub fn failure(errors: Vec<String>) -> Self {
        ParseResult {
            success: false,
            pipelines: Vec::new(),
            statistics: Statistics::default(),
            errors: Some(errors),
            warnings: None,
        }
    }

    pub fn errors(&self) -> &[String] {
        self.errors.as_deref().unwrap_or(&[])
    }

    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or(&[])
    }

    pub fn pipeline(&self, id: &str) -> Option<&PipelineConfig> {
        self.pipelines.iter().find(|p| p.id == id)
    }
}
