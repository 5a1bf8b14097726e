//! # Toast State
//!
//! Short-lived notices ("Added to cart", "Invalid JSON").
//!
//! ## Lifecycle
//! ```text
//! push("Undid change")
//!      │
//!      ├──► queue.push(Toast { id, message, duration })
//!      ├──► broadcast ToastEvent::Shown
//!      └──► spawn timer ── sleep(duration) ──► dismiss(id)
//!                                                  │
//! dismiss(id) (manual, any time) ──────────────────┤
//!                                                  ▼
//!                               queue.retain(id != ..), ToastEvent::Dismissed
//! ```
//!
//! Each toast owns its timer. Dismissing a toast early leaves its timer to
//! fire later against an id that no longer exists, which is a no-op.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};
use uuid::Uuid;

use crate::settings::DEFAULT_TOAST_MS;

/// Lifetime of error notices ("Invalid JSON", failed saves and file I/O).
pub const ERROR_TOAST_MS: u64 = 2600;

/// A notice on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub duration_ms: u64,
}

/// What subscribers are told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown(Toast),
    Dismissed(Uuid),
}

/// Shared toast queue.
#[derive(Debug, Clone)]
pub struct ToastState {
    toasts: Arc<Mutex<Vec<Toast>>>,
    events: broadcast::Sender<ToastEvent>,
    default_duration: Duration,
}

impl ToastState {
    pub fn new(default_duration: Duration) -> Self {
        let (events, _) = broadcast::channel(64);
        ToastState {
            toasts: Arc::new(Mutex::new(Vec::new())),
            events,
            default_duration,
        }
    }

    /// Shows a notice for the default duration.
    ///
    /// Must be called inside a Tokio runtime (the auto-dismiss timer is a
    /// spawned task).
    pub fn push(&self, message: impl Into<String>) -> Uuid {
        self.push_for(message, self.default_duration)
    }

    /// Shows a notice for `duration`.
    pub fn push_for(&self, message: impl Into<String>, duration: Duration) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            message: message.into(),
            duration_ms: duration.as_millis() as u64,
        };
        let id = toast.id;
        info!(toast_id = %id, message = %toast.message, "Toast");

        self.toasts.lock().expect("Toast mutex poisoned").push(toast.clone());
        let _ = self.events.send(ToastEvent::Shown(toast));

        let state = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            state.dismiss(id);
        });

        id
    }

    /// Removes a notice. Returns false when it was already gone.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let removed = {
            let mut toasts = self.toasts.lock().expect("Toast mutex poisoned");
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        };

        if removed {
            debug!(toast_id = %id, "Toast dismissed");
            let _ = self.events.send(ToastEvent::Dismissed(id));
        }
        removed
    }

    /// Notices currently on screen, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.toasts.lock().expect("Toast mutex poisoned").clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.events.subscribe()
    }
}

impl Default for ToastState {
    fn default() -> Self {
        ToastState::new(Duration::from_millis(DEFAULT_TOAST_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_after_duration() {
        let toasts = ToastState::default();
        toasts.push("Added to cart");
        assert_eq!(toasts.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(2199)).await;
        assert_eq!(toasts.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(toasts.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_duration_outlives_default() {
        let toasts = ToastState::default();
        toasts.push("Imported configuration");
        toasts.push_for("Invalid JSON", Duration::from_millis(ERROR_TOAST_MS));

        tokio::time::sleep(Duration::from_millis(2300)).await;
        let active = toasts.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Invalid JSON");
        assert_eq!(active[0].duration_ms, 2600);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(toasts.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss() {
        let toasts = ToastState::default();
        let first = toasts.push("one");
        let second = toasts.push("two");

        assert!(toasts.dismiss(first));
        assert!(!toasts.dismiss(first));
        assert_eq!(toasts.active().len(), 1);
        assert_eq!(toasts.active()[0].id, second);

        // The dismissed toast's timer firing later changes nothing.
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert!(toasts.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events() {
        let toasts = ToastState::default();
        let mut events = toasts.subscribe();

        let id = toasts.push("Reset to defaults");
        match events.recv().await.unwrap() {
            ToastEvent::Shown(t) => assert_eq!(t.message, "Reset to defaults"),
            other => panic!("unexpected event {other:?}"),
        }

        tokio::time::sleep(Duration::from_millis(2300)).await;
        assert_eq!(events.recv().await.unwrap(), ToastEvent::Dismissed(id));
    }
}
