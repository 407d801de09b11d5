use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineConfig;

/// Version stamped on every deployment bundle.
pub const BUNDLE_VERSION: &str = "1.0";

/// One assembly row per pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyEntry {
    pub id: String,
    pub name: String,
    pub modules: Vec<ModuleRef>,
}

/// Structural reference to a module in a pipeline's stage chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRef {
    pub stage: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyTable {
    pub pipelines: Vec<AssemblyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    pub load_balancing: LoadBalancing,
    pub retry: RetryPolicy,
    pub health_check: HealthCheck,
    pub max_concurrent: u32,
    pub default_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancing {
    pub strategy: String,
    /// Per-pipeline weight, in pipeline order.
    pub weights: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backoff {
    #[serde(rename = "type")]
    pub kind: String,
    pub initial_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub enabled: bool,
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

/// Everything a deployment needs in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentBundle {
    pub version: String,
    pub pipelines: Vec<PipelineConfig>,
    /// Virtual model name → ids of the pipelines carrying it.
    pub routing: IndexMap<String, Vec<String>>,
    pub assembly: AssemblyTable,
    pub scheduler: SchedulerConfig,
}
