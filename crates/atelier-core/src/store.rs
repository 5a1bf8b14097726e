//! # Configuration Store
//!
//! Holds the current [`Configuration`] and its undo/redo [`History`].
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Store Operations                       │
//! │                                                                         │
//! │  Editor Action            Store Method         History Effect           │
//! │  ─────────────            ────────────         ──────────────           │
//! │                                                                         │
//! │  Edit a field ──────────► change(updater) ───► past.push, future.clear │
//! │                                                                         │
//! │  Import / Reset ────────► change(updater) ───► past.push, future.clear │
//! │                                                                         │
//! │  Ctrl+Z ────────────────► undo() ────────────► past.pop → future.push  │
//! │                                                                         │
//! │  Ctrl+Y / Ctrl+Shift+Z ─► redo() ────────────► future.pop → past.push  │
//! │                                                                         │
//! │  NOTE: change() does not validate. External data must go through       │
//! │        validation::validate before it reaches the store.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is copy-modify-replace: the updater works on its own
//! copy, and `current` is swapped only once the next value exists.

use crate::config::Configuration;
use crate::history::History;

/// The configuration store.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    current: Configuration,
    history: History,
}

impl Default for ConfigStore {
    fn default() -> Self {
        ConfigStore::new(Configuration::default())
    }
}

impl ConfigStore {
    /// Creates a store with an empty history.
    ///
    /// Startup adopts its initial value (defaults, stored record or shared
    /// link) through here, so loading never creates an undo step.
    pub fn new(initial: Configuration) -> Self {
        ConfigStore {
            current: initial,
            history: History::default(),
        }
    }

    /// Creates a store with a custom history limit.
    pub fn with_history_limit(initial: Configuration, limit: usize) -> Self {
        ConfigStore {
            current: initial,
            history: History::with_limit(limit),
        }
    }

    /// Returns the current configuration.
    pub fn current(&self) -> &Configuration {
        &self.current
    }

    /// Commits a forward edit.
    ///
    /// ## Behavior
    /// - `updater` receives a copy of `current` and returns the next value
    ///   (a derived value or a whole replacement)
    /// - The pre-change value is pushed onto `past` (oldest evicted past 50)
    /// - `future` is cleared
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::ConfigStore;
    ///
    /// let mut store = ConfigStore::default();
    /// store.change(|mut c| {
    ///     c.layout.dark = true;
    ///     c
    /// });
    /// assert!(store.current().layout.dark);
    /// assert!(store.can_undo());
    /// ```
    pub fn change<F>(&mut self, updater: F) -> &Configuration
    where
        F: FnOnce(Configuration) -> Configuration,
    {
        let next = updater(self.current.clone());
        debug_assert!(next.is_within_domain(), "unvalidated configuration committed");

        let previous = std::mem::replace(&mut self.current, next);
        self.history.record(previous);
        &self.current
    }

    /// Commits a whole replacement value.
    pub fn replace(&mut self, next: Configuration) -> &Configuration {
        self.change(|_| next)
    }

    /// Steps back one edit. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.current.clone()) {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Re-applies the most recently undone edit. Returns false when there
    /// was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.current.clone()) {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }

    /// Restores the defaults as a regular, undoable edit.
    ///
    /// Confirmation is the shell's business; once called, the reset happens.
    pub fn reset(&mut self) -> &Configuration {
        self.replace(Configuration::default())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Read access to the history (for diagnostics and tests).
    pub fn history(&self) -> &History {
        &self.history
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HISTORY_LIMIT;

    fn set_gap(store: &mut ConfigStore, gap: u32) {
        store.change(|mut c| {
            c.gallery.gap = gap;
            c
        });
    }

    #[test]
    fn test_undo_restores_the_snapshot_before_the_first_change() {
        let mut store = ConfigStore::default();
        let original = store.current().clone();

        for gap in 0..10 {
            set_gap(&mut store, gap);
        }
        for _ in 0..10 {
            assert!(store.undo());
        }

        assert_eq!(store.current(), &original);
        assert!(!store.undo());
    }

    #[test]
    fn test_redo_restores_the_pre_undo_value() {
        let mut store = ConfigStore::default();
        set_gap(&mut store, 30);
        let before_undo = store.current().clone();

        assert!(store.undo());
        assert_eq!(store.current().gallery.gap, 12);
        assert!(store.redo());
        assert_eq!(store.current(), &before_undo);
        assert!(!store.redo());
    }

    #[test]
    fn test_change_clears_future() {
        let mut store = ConfigStore::default();
        set_gap(&mut store, 1);
        set_gap(&mut store, 2);
        store.undo();
        assert!(store.can_redo());

        set_gap(&mut store, 3);
        assert!(!store.can_redo());
        assert_eq!(store.history().future_len(), 0);
    }

    #[test]
    fn test_history_keeps_only_the_most_recent_fifty() {
        let mut store = ConfigStore::default();
        for gap in 1..=60 {
            set_gap(&mut store, gap % 41);
        }
        assert_eq!(store.history().past_len(), HISTORY_LIMIT);

        let mut undone = 0;
        while store.undo() {
            undone += 1;
        }
        assert_eq!(undone, HISTORY_LIMIT);
        // Change #11 replaced gap 10; the ten states before it were evicted.
        assert_eq!(store.current().gallery.gap, 10);
    }

    #[test]
    fn test_undo_redo_cycle_never_exceeds_limit() {
        let mut store = ConfigStore::with_history_limit(Configuration::default(), 5);
        for gap in 0..8 {
            set_gap(&mut store, gap);
        }
        for _ in 0..3 {
            store.undo();
        }
        for _ in 0..3 {
            store.redo();
        }
        assert_eq!(store.history().past_len(), 5);
        assert_eq!(store.current().gallery.gap, 7);
    }

    #[test]
    fn test_reset_is_undoable() {
        let mut store = ConfigStore::default();
        store.change(|mut c| {
            c.typography.size = 40;
            c
        });
        store.reset();
        assert_eq!(store.current(), &Configuration::default());

        store.undo();
        assert_eq!(store.current().typography.size, 40);
    }

    #[test]
    fn test_updater_receives_current_value() {
        let mut store = ConfigStore::default();
        set_gap(&mut store, 20);
        store.change(|mut c| {
            c.gallery.gap += 5;
            c
        });
        assert_eq!(store.current().gallery.gap, 25);
    }
}
