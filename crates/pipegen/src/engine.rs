//! Resolution pass: validate → resolve → map virtual models → statistics and warnings.
//!
//! Responsibilities:
//! - Abort with a failed `ParseResult` on structural errors.
//! - Expand the validated config into one pipeline per key.
//! - Attach virtual models and synthesize defaults.
//! - Compute statistics and collect warnings; none of them block success.
//! - Report fixed progress checkpoints and hand the result to the history sink.

use indexmap::IndexMap;

use crate::error::Result;
use crate::history::{HistorySink, NoHistory};
use crate::optimize::merge_pipelines;
use crate::pipeline::ParseResult;
use crate::progress::{Checkpoint, NoProgress, ProgressReporter, notify};
use crate::resolve::{
    analyze, collect_statistics, into_user_config, map_virtual_models, resolve_pipelines,
};
use crate::source::ConfigSource;
use crate::schema::RawUserConfig;

/// Stateless resolver with an injected history sink.
#[derive(Debug, Default)]
pub struct PipelineEngine<H: HistorySink = NoHistory> {
    history: H,
}

impl PipelineEngine<NoHistory> {
    pub fn new() -> Self {
        PipelineEngine { history: NoHistory }
    }
}

impl<H: HistorySink> PipelineEngine<H> {
    pub fn with_history(history: H) -> Self {
        PipelineEngine { history }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn parse(&self, raw: &RawUserConfig) -> ParseResult {
        self.parse_with_progress(raw, &mut NoProgress)
    }

    pub fn parse_with_progress(
        &self,
        raw: &RawUserConfig,
        progress: &mut dyn ProgressReporter,
    ) -> ParseResult {
        let result = resolve(raw, progress);
        self.history.record(&result);
        result
    }

    /// Load from `source`, then resolve. Load failures are returned as errors;
    /// structural problems end up in the result.
    pub fn load_and_parse(
        &self,
        source: &dyn ConfigSource,
        progress: &mut dyn ProgressReporter,
    ) -> Result<ParseResult> {
        tracing::info!("loading config from {}", source.describe());
        let raw = source.load()?;
        Ok(self.parse_with_progress(&raw, progress))
    }
}

/// One-shot resolution without progress reporting or history.
pub fn parse_user_config(raw: &RawUserConfig) -> ParseResult {
    resolve(raw, &mut NoProgress)
}

fn resolve(raw: &RawUserConfig, progress: &mut dyn ProgressReporter) -> ParseResult {
    notify(progress, Checkpoint::Validate);
    let config = match into_user_config(raw) {
        Ok(cfg) => cfg,
        Err(report) => {
            let errors = report.messages();
            tracing::warn!(
                "config rejected with {} structural error(s): {}",
                errors.len(),
                errors.join("; ")
            );
            notify(progress, Checkpoint::Done);
            return ParseResult::failure(errors);
        }
    };

    notify(progress, Checkpoint::ResolveProviders);
    let mut pipelines = resolve_pipelines(&config);

    notify(progress, Checkpoint::MapVirtualModels);
    let mapping = map_virtual_models(&mut pipelines, &config.virtual_models);

    notify(progress, Checkpoint::Statistics);
    let statistics = collect_statistics(&pipelines);
    let mut warnings: Vec<String> = mapping.warnings.iter().map(|w| w.to_string()).collect();
    warnings.extend(
        analyze(&pipelines, &config.virtual_models)
            .iter()
            .map(|w| w.to_string()),
    );

    tracing::info!(
        "resolved {} pipeline(s) across {} provider(s), {} model(s); {} alias attachment(s), {} default(s), {} warning(s)",
        statistics.total_pipelines,
        statistics.total_providers,
        statistics.total_models,
        mapping.attached,
        mapping.defaulted,
        warnings.len()
    );
    notify(progress, Checkpoint::Done);

    ParseResult {
        success: true,
        pipelines,
        statistics,
        errors: None,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
    }
}

impl ParseResult {
    /// Merged copy of a successful result. Statistics, scale and duplicate-key
    /// warnings are recomputed over the merged list; mapping and unused-alias
    /// warnings are kept. Failed results are returned as-is.
    pub fn optimized(&self) -> ParseResult {
        if !self.success {
            return self.clone();
        }
        let pipelines = merge_pipelines(&self.pipelines);

        let no_aliases = IndexMap::new();
        let stale: Vec<String> = analyze(&self.pipelines, &no_aliases)
            .iter()
            .map(|w| w.to_string())
            .collect();
        let mut warnings: Vec<String> = self
            .warnings()
            .iter()
            .filter(|w| !stale.contains(w))
            .cloned()
            .collect();
        warnings.extend(analyze(&pipelines, &no_aliases).iter().map(|w| w.to_string()));

        ParseResult {
            success: true,
            statistics: collect_statistics(&pipelines),
            pipelines,
            errors: self.errors.clone(),
            warnings: if warnings.is_empty() {
                None
            } else {
                Some(warnings)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::source::StaticConfigSource;

    fn raw(json: &str) -> RawUserConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reports_checkpoints_in_order() {
        let mut steps = Vec::new();
        let mut reporter = |step: &str, percent: u8| steps.push((step.to_string(), percent));
        let result = PipelineEngine::new().parse_with_progress(
            &raw(r#"{ "providers": { "p": { "models": { "m": { "keys": ["k"] } } } } }"#),
            &mut reporter,
        );
        assert!(result.success);
        let expected: Vec<(String, u8)> = Checkpoint::ALL
            .iter()
            .map(|c| (c.step().to_string(), c.percent()))
            .collect();
        assert_eq!(steps, expected);
    }

    #[test]
    fn validation_failure_short_circuits() {
        let mut steps = Vec::new();
        let mut reporter = |step: &str, _: u8| steps.push(step.to_string());
        let result =
            PipelineEngine::new().parse_with_progress(&raw(r#"{ "providers": {} }"#), &mut reporter);
        assert!(!result.success);
        assert!(result.pipelines.is_empty());
        assert!(!result.errors().is_empty());
        assert_eq!(steps, vec!["validate", "done"]);
    }

    #[test]
    fn history_receives_every_result() {
        let engine = PipelineEngine::with_history(MemoryHistory::new(5));
        engine.parse(&raw("{}"));
        let src = StaticConfigSource::new(raw(
            r#"{ "providers": { "p": { "models": { "m": { "keys": ["k"] } } } } }"#,
        ));
        let result = engine.load_and_parse(&src, &mut NoProgress).unwrap();
        assert!(result.success);
        assert_eq!(engine.history().len(), 2);
        assert!(!engine.history().snapshot()[0].success);
    }

    #[test]
    fn optimized_recomputes_statistics() {
        let result = parse_user_config(&raw(
            r#"{ "providers": { "p": { "models": { "m": { "keys": ["a", "b", "a"] } } } } }"#,
        ));
        assert_eq!(result.statistics.total_pipelines, 3);
        assert_eq!(result.statistics.total_keys, 3);
        // duplicate key "a" is reported on the unmerged list
        assert_eq!(result.warnings().len(), 1);

        let merged = result.optimized();
        assert_eq!(merged.statistics.total_pipelines, 1);
        assert_eq!(merged.statistics.total_keys, 2);
        assert_eq!(merged.pipelines[0].id, "p.m.merged");
        // the merged pipeline holds "a" once
        assert!(merged.warnings.is_none());
    }

    #[test]
    fn optimized_recomputes_scale_warning_and_keeps_alias_warnings() {
        let keys: Vec<String> = (0..60).map(|i| format!("key-{i}")).collect();
        let cfg: RawUserConfig = serde_json::from_value(serde_json::json!({
            "providers": { "p": { "models": { "m": { "keys": keys } } } },
            "virtualModels": { "ghost": { "targetProvider": "q", "targetModel": "m" } }
        }))
        .unwrap();
        let result = parse_user_config(&cfg);
        assert!(result.warnings().iter().any(|w| w.contains("60 pipelines")));

        let merged = result.optimized();
        assert_eq!(merged.pipelines.len(), 1);
        assert!(merged.warnings().iter().all(|w| !w.contains("pipelines generated")));
        assert!(merged.warnings().iter().any(|w| w.contains("no pipeline for virtual model 'ghost'")));
        assert!(merged.warnings().iter().any(|w| w.contains("unused virtual model 'ghost'")));
        assert_eq!(merged.warnings().len(), 2);
    }
}
