//! Sinks that receive each `ParseResult` after a resolution pass.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::pipeline::ParseResult;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

pub trait HistorySink: Send + Sync {
    fn record(&self, result: &ParseResult);
}

/// Drops every result.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistorySink for NoHistory {
    fn record(&self, _result: &ParseResult) {}
}

/// Keeps the most recent `capacity` results, oldest evicted first.
#[derive(Debug)]
pub struct MemoryHistory {
    capacity: usize,
    entries: Mutex<VecDeque<ParseResult>>,
}

impl MemoryHistory {
    pub fn new(capacity: usize) -> Self {
        MemoryHistory {
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
        }
    }

    /// Recorded results, oldest first.
    pub fn snapshot(&self) -> Vec<ParseResult> {
        self.lock().iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<ParseResult> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ParseResult>> {
        // A poisoned lock still holds consistent data: every mutation is a single push/pop.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        MemoryHistory::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistorySink for MemoryHistory {
    fn record(&self, result: &ParseResult) {
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(result.clone());
    }
}

impl<T: HistorySink + ?Sized> HistorySink for std::sync::Arc<T> {
    fn record(&self, result: &ParseResult) {
        (**self).record(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: usize) -> ParseResult {
        ParseResult::failure(vec![format!("error {n}")])
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let history = MemoryHistory::new(2);
        for n in 0..3 {
            history.record(&result(n));
        }
        let kept: Vec<String> = history
            .snapshot()
            .iter()
            .map(|r| r.errors()[0].clone())
            .collect();
        assert_eq!(kept, vec!["error 1", "error 2"]);
        assert_eq!(history.latest().unwrap().errors()[0], "error 2");
    }

    #[test]
    fn clear_empties_history() {
        let history = MemoryHistory::default();
        history.record(&result(0));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }
}
