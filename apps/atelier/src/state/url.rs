//! # URL State
//!
//! The page location whose fragment carries the shareable configuration
//! token, and the debounced writer that keeps it current.
//!
//! ## Debounce
//! ```text
//!  commit  commit      commit
//!    │       │           │
//!    ▼       ▼           ▼
//!    ●──x    ●──────x    ●────────── 300 ms ─────────► write "#cfg=<token>"
//!       │           │                                  (skipped if equal)
//!    aborted     aborted
//! ```
//!
//! Only the most recently scheduled write can fire. The write itself is a
//! plain replace of the fragment: no history entry, no notice.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use atelier_core::{codec, Configuration, URL_DEBOUNCE_MS};
use tokio::task::JoinHandle;
use tracing::debug;

/// Shared location handle.
#[derive(Debug, Clone)]
pub struct UrlState {
    base_url: String,
    fragment: Arc<Mutex<Option<String>>>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
    writes: Arc<AtomicUsize>,
    debounce: Duration,
}

impl UrlState {
    /// A location at `base_url` with no fragment yet.
    pub fn new(base_url: impl Into<String>, debounce: Duration) -> Self {
        UrlState {
            base_url: base_url.into(),
            fragment: Arc::new(Mutex::new(None)),
            pending: Arc::new(Mutex::new(None)),
            writes: Arc::new(AtomicUsize::new(0)),
            debounce,
        }
    }

    /// Sets the fragment the session was opened with.
    pub fn with_fragment(self, fragment: impl Into<String>) -> Self {
        *self.fragment.lock().expect("URL mutex poisoned") = Some(fragment.into());
        self
    }

    /// The current fragment, including its `#`.
    pub fn fragment(&self) -> Option<String> {
        self.fragment.lock().expect("URL mutex poisoned").clone()
    }

    /// The full page URL: base plus current fragment.
    pub fn href(&self) -> String {
        let base = self.base_url.split('#').next().unwrap_or_default();
        match self.fragment() {
            Some(fragment) => format!("{base}{fragment}"),
            None => base.to_string(),
        }
    }

    /// Schedules the fragment to follow `config` once edits go quiet.
    ///
    /// Cancels any write still waiting. Must be called inside a Tokio
    /// runtime.
    pub fn schedule(&self, config: &Configuration) {
        let target = codec::fragment_for(&codec::encode(config));
        let fragment = Arc::clone(&self.fragment);
        let writes = Arc::clone(&self.writes);
        let debounce = self.debounce;

        let mut pending = self.pending.lock().expect("URL mutex poisoned");
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let mut current = fragment.lock().expect("URL mutex poisoned");
            if current.as_deref() == Some(target.as_str()) {
                debug!("URL fragment already current");
                return;
            }
            debug!(bytes = target.len(), "Writing URL fragment");
            *current = Some(target);
            writes.fetch_add(1, Ordering::Relaxed);
        }));
    }

    /// Whether a write is still waiting for its quiet period.
    pub fn has_pending_write(&self) -> bool {
        self.pending
            .lock()
            .expect("URL mutex poisoned")
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Fragment writes performed so far. Skipped writes are not counted.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl Default for UrlState {
    fn default() -> Self {
        UrlState::new("http://localhost:5173/", Duration::from_millis(URL_DEBOUNCE_MS))
    }
}
