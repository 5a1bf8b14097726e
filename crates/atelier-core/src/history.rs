//! # Undo/Redo History
//!
//! Two stacks of configuration snapshots owned by the [`crate::ConfigStore`].
//!
//! ```text
//!            past (≤ 50, oldest evicted)          future
//!   ┌────┬────┬────┬─────┬────┐            ┌────┬────┐
//!   │ c0 │ c1 │ c2 │ ... │ cN │  current   │ f1 │ f0 │
//!   └────┴────┴────┴─────┴────┘            └────┴────┘
//!        ▲ evict            ▲ push/pop           ▲ push/pop
//! ```
//!
//! Invariant: `future` is empty except right after an undo. Only
//! [`History::record`] clears it.

use std::collections::VecDeque;

use crate::config::Configuration;
use crate::HISTORY_LIMIT;

/// Bounded snapshot history.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Configuration>,
    future: Vec<Configuration>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        History::with_limit(HISTORY_LIMIT)
    }
}

impl History {
    /// Creates an empty history keeping at most `limit` undo snapshots.
    pub fn with_limit(limit: usize) -> Self {
        History {
            past: VecDeque::with_capacity(limit.min(64)),
            future: Vec::new(),
            limit,
        }
    }

    /// Records the value a forward edit is replacing and clears `future`.
    pub fn record(&mut self, previous: Configuration) {
        self.push_past(previous);
        self.future.clear();
    }

    /// Swaps `current` for the most recent past snapshot.
    ///
    /// Returns the snapshot to adopt, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: Configuration) -> Option<Configuration> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Swaps `current` for the most recently undone snapshot.
    pub fn redo(&mut self, current: Configuration) -> Option<Configuration> {
        let next = self.future.pop()?;
        self.push_past(current);
        Some(next)
    }

    // past.len() + future.len() never exceeds the limit, so in practice only
    // forward edits evict.
    fn push_past(&mut self, snapshot: Configuration) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_radius(radius: u32) -> Configuration {
        let mut c = Configuration::default();
        c.button.radius = radius;
        c
    }

    #[test]
    fn test_empty_history_is_a_no_op() {
        let mut history = History::default();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo(with_radius(1)).is_none());
        assert!(history.redo(with_radius(1)).is_none());
        assert_eq!(history.future_len(), 0);
    }

    #[test]
    fn test_record_evicts_oldest() {
        let mut history = History::with_limit(3);
        for r in 0..5 {
            history.record(with_radius(r));
        }
        assert_eq!(history.past_len(), 3);

        let mut current = with_radius(5);
        let mut seen = Vec::new();
        while let Some(prev) = history.undo(current.clone()) {
            seen.push(prev.button.radius);
            current = prev;
        }
        assert_eq!(seen, vec![4, 3, 2]);
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = History::default();
        history.record(with_radius(1));
        let _ = history.undo(with_radius(2));
        assert!(history.can_redo());

        history.record(with_radius(1));
        assert!(!history.can_redo());
    }
}
