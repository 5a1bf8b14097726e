//! # Configuration State
//!
//! The single [`ConfigStore`] of the session, behind a mutex.
//!
//! ## Thread Safety
//! Every mutation runs to completion under the lock: the updater gets a
//! copy, returns the next value, and the store swaps it in. Readers never
//! see a half-applied edit.

use std::sync::{Arc, Mutex};

use atelier_core::{ConfigStore, Configuration};

/// Shared handle to the configuration store.
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    store: Arc<Mutex<ConfigStore>>,
}

impl ConfigState {
    /// Creates a store holding `initial` with an empty history.
    pub fn new(initial: Configuration) -> Self {
        ConfigState {
            store: Arc::new(Mutex::new(ConfigStore::new(initial))),
        }
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ConfigStore) -> R,
    {
        let store = self.store.lock().expect("Config store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let next = config.with_store_mut(|s| s.change(|c| apply_path(&c, path, value)).clone());
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ConfigStore) -> R,
    {
        let mut store = self.store.lock().expect("Config store mutex poisoned");
        f(&mut store)
    }

    /// A copy of the current configuration.
    pub fn current(&self) -> Configuration {
        self.with_store(|s| s.current().clone())
    }
}
