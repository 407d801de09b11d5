//! Synchronous progress notifications emitted at fixed resolution checkpoints.

/// Resolution checkpoints, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Validate,
    ResolveProviders,
    MapVirtualModels,
    Statistics,
    Done,
}

impl Checkpoint {
    pub const ALL: [Checkpoint; 5] = [
        Checkpoint::Validate,
        Checkpoint::ResolveProviders,
        Checkpoint::MapVirtualModels,
        Checkpoint::Statistics,
        Checkpoint::Done,
    ];

    pub fn step(&self) -> &'static str {
        match self {
            Checkpoint::Validate => "validate",
            Checkpoint::ResolveProviders => "resolve-providers",
            Checkpoint::MapVirtualModels => "map-virtual-models",
            Checkpoint::Statistics => "statistics",
            Checkpoint::Done => "done",
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            Checkpoint::Validate => 10,
            Checkpoint::ResolveProviders => 30,
            Checkpoint::MapVirtualModels => 60,
            Checkpoint::Statistics => 90,
            Checkpoint::Done => 100,
        }
    }
}

/// Receives `(step, percent)` notifications. Panics are not caught by the engine.
pub trait ProgressReporter {
    fn report(&mut self, step: &str, percent: u8);
}

impl<F> ProgressReporter for F
where
    F: FnMut(&str, u8),
{
    fn report(&mut self, step: &str, percent: u8) {
        self(step, percent)
    }
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _step: &str, _percent: u8) {}
}

/// Logs each checkpoint at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report(&mut self, step: &str, percent: u8) {
        tracing::debug!("resolution progress: {} ({}%)", step, percent);
    }
}

pub(crate) fn notify(reporter: &mut dyn ProgressReporter, checkpoint: Checkpoint) {
    reporter.report(checkpoint.step(), checkpoint.percent());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_increase_to_one_hundred() {
        let percents: Vec<u8> = Checkpoint::ALL.iter().map(|c| c.percent()).collect();
        assert!(percents.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(percents.last(), Some(&100));
    }

    #[test]
    fn closures_are_reporters() {
        let mut seen = Vec::new();
        {
            let mut reporter = |step: &str, percent: u8| seen.push((step.to_string(), percent));
            notify(&mut reporter, Checkpoint::MapVirtualModels);
        }
        assert_eq!(seen, vec![("map-virtual-models".to_string(), 60)]);
    }
}
