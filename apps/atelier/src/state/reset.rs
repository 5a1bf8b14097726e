//! # Reset Confirmation
//!
//! Reset asks first.
//!
//! ```text
//!          request()              confirm()  ──► reset the store
//!  Idle ─────────────► ConfirmPending ──────────────────────────► Idle
//!    ▲                       │
//!    └───────────────────────┘ cancel()
//! ```

use std::sync::{Arc, Mutex};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResetPhase {
    #[default]
    Idle,
    ConfirmPending,
}

#[derive(Debug, Clone, Default)]
pub struct ResetState {
    phase: Arc<Mutex<ResetPhase>>,
}

impl ResetState {
    pub fn new() -> Self {
        ResetState::default()
    }

    pub fn phase(&self) -> ResetPhase {
        *self.phase.lock().expect("Reset mutex poisoned")
    }

    /// Opens the confirmation.
    pub fn request(&self) -> ResetPhase {
        let mut phase = self.phase.lock().expect("Reset mutex poisoned");
        *phase = ResetPhase::ConfirmPending;
        *phase
    }

    /// Closes the confirmation. Returns true when a reset was pending and
    /// should now happen.
    pub fn confirm(&self) -> bool {
        let mut phase = self.phase.lock().expect("Reset mutex poisoned");
        let pending = *phase == ResetPhase::ConfirmPending;
        *phase = ResetPhase::Idle;
        pending
    }

    /// Closes the confirmation without resetting.
    pub fn cancel(&self) -> ResetPhase {
        let mut phase = self.phase.lock().expect("Reset mutex poisoned");
        *phase = ResetPhase::Idle;
        *phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_then_confirm() {
        let reset = ResetState::new();
        assert_eq!(reset.request(), ResetPhase::ConfirmPending);
        assert!(reset.confirm());
        assert_eq!(reset.phase(), ResetPhase::Idle);
    }

    #[test]
    fn test_confirm_without_request() {
        let reset = ResetState::new();
        assert!(!reset.confirm());
    }

    #[test]
    fn test_cancel() {
        let reset = ResetState::new();
        reset.request();
        assert_eq!(reset.cancel(), ResetPhase::Idle);
        assert!(!reset.confirm());
    }
}
