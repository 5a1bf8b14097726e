//! # Configuration Commands
//!
//! Editing, undo/redo and reset of the style configuration.
//!
//! ## Commit Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_field / undo / redo / confirm_reset / import                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ConfigState.with_store_mut(change | undo | redo)   (under the lock)    │
//! │        │                                                                │
//! │        ▼ next configuration                                             │
//! │  ┌───────────────────────────┐   ┌──────────────────────────────────┐  │
//! │  │ db.save_config (now)      │   │ url.schedule (after 300 ms quiet)│  │
//! │  └───────────────────────────┘   └──────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use atelier_core::validation::apply_path;
use atelier_core::{ConfigStore, Configuration};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, DbState, ResetPhase, ResetState, ToastState, UrlState};

/// The configuration plus what the undo/redo buttons need.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub config: Configuration,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl From<&ConfigStore> for ConfigResponse {
    fn from(store: &ConfigStore) -> Self {
        ConfigResponse {
            config: store.current().clone(),
            can_undo: store.can_undo(),
            can_redo: store.can_redo(),
        }
    }
}

/// Gets the current configuration.
pub fn get_config(config: &ConfigState) -> ConfigResponse {
    debug!("get_config command");
    config.with_store(|store| ConfigResponse::from(store))
}

/// Sets one field by dotted path, e.g. `button.radius` to `20`.
///
/// The value goes through the validator with the rest of the configuration,
/// so `button.radius 999` commits 32 and `button.shadow "huge"` commits the
/// default shadow.
///
/// ## Errors
/// * `NotFound` - `path` names no field
pub async fn set_field(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
    path: &str,
    value: Value,
) -> ApiResult<ConfigResponse> {
    debug!(path = %path, value = %value, "set_field command");

    let (response, next) = config.with_store_mut(|store| {
        if !field_exists(store.current(), path) {
            return Err(ApiError::not_found("Field", path));
        }
        let next = store.change(|current| apply_path(&current, path, value)).clone();
        Ok((ConfigResponse::from(&*store), next))
    })?;

    commit(db, url, toasts, &next).await;
    Ok(response)
}

/// Steps back one edit. No-op (and no notice) when there is nothing to undo.
pub async fn undo(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
) -> ConfigResponse {
    debug!("undo command");

    let (stepped, response) = config.with_store_mut(|store| {
        let stepped = store.undo();
        (stepped, ConfigResponse::from(&*store))
    });

    if stepped {
        commit(db, url, toasts, &response.config).await;
        toasts.push("Undid change");
    }
    response
}

/// Re-applies one undone edit. No-op when there is nothing to redo.
pub async fn redo(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
) -> ConfigResponse {
    debug!("redo command");

    let (stepped, response) = config.with_store_mut(|store| {
        let stepped = store.redo();
        (stepped, ConfigResponse::from(&*store))
    });

    if stepped {
        commit(db, url, toasts, &response.config).await;
        toasts.push("Redid change");
    }
    response
}

/// Opens the reset confirmation.
pub fn request_reset(reset: &ResetState) -> ResetPhase {
    debug!("request_reset command");
    reset.request()
}

/// Closes the reset confirmation without resetting.
pub fn cancel_reset(reset: &ResetState) -> ResetPhase {
    debug!("cancel_reset command");
    reset.cancel()
}

/// Resets to defaults if a reset was requested.
///
/// The reset is an ordinary edit: it can be undone.
///
/// ## Errors
/// * `ValidationError` - no reset is pending
pub async fn confirm_reset(
    db: &DbState,
    config: &ConfigState,
    url: &UrlState,
    toasts: &ToastState,
    reset: &ResetState,
) -> ApiResult<ConfigResponse> {
    debug!("confirm_reset command");

    if !reset.confirm() {
        return Err(ApiError::validation("No reset pending; use `reset` first"));
    }

    let response = config.with_store_mut(|store| {
        store.reset();
        ConfigResponse::from(&*store)
    });

    commit(db, url, toasts, &response.config).await;
    toasts.push("Reset to defaults");
    Ok(response)
}

/// Persists a newly committed configuration and schedules the URL write.
/// A failed save shows a notice; the edit itself stands.
pub(crate) async fn commit(
    db: &DbState,
    url: &UrlState,
    toasts: &ToastState,
    next: &Configuration,
) {
    url.schedule(next);
    db.save_config(next, toasts).await;
}

fn field_exists(config: &Configuration, path: &str) -> bool {
    let pointer = format!("/{}", path.replace('.', "/"));
    serde_json::to_value(config)
        .ok()
        .and_then(|raw| raw.pointer(&pointer).map(|slot| !slot.is_object()))
        .unwrap_or(false)
}
