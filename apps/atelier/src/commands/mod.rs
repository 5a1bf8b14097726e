//! # Commands Module
//!
//! Everything the shell can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── config.rs     ◄─── get, set field, undo/redo, reset confirmation
//! ├── transfer.rs   ◄─── import (file, drop, text), export, clipboard
//! ├── cart.rs       ◄─── add configured chair, quantities, remove, clear
//! └── customize.rs  ◄─── chair picker fields
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the store
//! fn get_config(config: &ConfigState)
//!
//! // Commits persist and update the URL
//! async fn undo(db: &DbState, config: &ConfigState, url: &UrlState, toasts: &ToastState)
//!
//! // Cart needs the picker to know what to add
//! async fn add_configured_chair(db, cart, customizer, toasts, preview)
//! ```

pub mod cart;
pub mod config;
pub mod customize;
pub mod transfer;

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use atelier_core::{Cart, Configuration, TaxRate};
    use atelier_db::{Database, DbConfig};

    use crate::state::{
        CartState, ConfigState, CustomizerState, DbState, ResetState, ToastState, UrlState,
    };

    /// Every state handle, on an in-memory database.
    pub struct Harness {
        pub db: DbState,
        pub config: ConfigState,
        pub cart: CartState,
        pub customizer: CustomizerState,
        pub toasts: ToastState,
        pub reset: ResetState,
        pub url: UrlState,
    }

    impl Harness {
        pub async fn new() -> Self {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            Harness {
                db: DbState::new(db),
                config: ConfigState::new(Configuration::default()),
                cart: CartState::new(Cart::new(), TaxRate::default()),
                customizer: CustomizerState::new(),
                toasts: ToastState::default(),
                reset: ResetState::new(),
                url: UrlState::new("http://localhost:5173/", Duration::from_millis(20)),
            }
        }
    }
}
