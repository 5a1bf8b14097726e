//! # Database State
//!
//! Wraps the `Database` connection for use in commands.
//!
//! ## Thread Safety
//! The `Database` from `atelier-db` holds a `SqlitePool`, which is
//! thread-safe on its own. No extra locking here.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn clear_cart(db: &DbState, cart: &CartState, toasts: &ToastState) -> CartResponse {
//!     let snapshot = cart.with_cart_mut(|c| { c.clear(); c.clone() });
//!     db.save_cart(&snapshot, toasts).await;
//!     ...
//! }
//! ```

use std::time::Duration;

use atelier_core::{Cart, Configuration};
use atelier_db::Database;
use tracing::warn;

use crate::state::{ToastState, ERROR_TOAST_MS};

pub const SAVE_CONFIG_FAILED: &str = "Could not save settings";
pub const SAVE_CART_FAILED: &str = "Could not save cart";

/// Wrapper around `Database` for the command layer.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// Persists the configuration.
    ///
    /// A failed write does not undo the edit; the user gets a notice and
    /// the in-memory state stays authoritative. Returns whether the write
    /// landed.
    pub async fn save_config(&self, config: &Configuration, toasts: &ToastState) -> bool {
        match self.db.config().save(config).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not persist configuration");
                toasts.push_for(SAVE_CONFIG_FAILED, Duration::from_millis(ERROR_TOAST_MS));
                false
            }
        }
    }

    /// Persists the cart, same policy as [`DbState::save_config`].
    pub async fn save_cart(&self, cart: &Cart, toasts: &ToastState) -> bool {
        match self.db.cart().save(cart).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not persist cart");
                toasts.push_for(SAVE_CART_FAILED, Duration::from_millis(ERROR_TOAST_MS));
                false
            }
        }
    }
}
