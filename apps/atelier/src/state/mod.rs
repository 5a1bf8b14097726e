//! # State Module
//!
//! Session state for the shell.
//!
//! One handle per concern instead of one `AppState`: each command takes
//! only the handles it touches, and every handle is a cheap clone around
//! shared, lock-guarded data.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌────────────────┐ ┌─────────────┐  │
//! │  │   DbState    │ │ ConfigState  │ │   CartState    │ │ Customizer  │  │
//! │  │  Database    │ │ Arc<Mutex<   │ │ Arc<Mutex<     │ │   State     │  │
//! │  │  (pool)      │ │ ConfigStore>>│ │ Cart>> + tax   │ │             │  │
//! │  └──────────────┘ └──────────────┘ └────────────────┘ └─────────────┘  │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌────────────────┐                  │
//! │  │  ToastState  │ │   UrlState   │ │   ResetState   │                  │
//! │  │ queue+timers │ │ fragment +   │ │ Idle /         │                  │
//! │  │ + broadcast  │ │ debounce     │ │ ConfirmPending │                  │
//! │  └──────────────┘ └──────────────┘ └────────────────┘                  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • DbState: SqlitePool is thread-safe                                  │
//! │  • Everything else: Arc<Mutex<T>>, locks never held across .await      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod customizer;
mod db;
mod reset;
mod toast;
mod url;

pub use cart::CartState;
pub use config::ConfigState;
pub use customizer::CustomizerState;
pub use db::{DbState, SAVE_CART_FAILED, SAVE_CONFIG_FAILED};
pub use reset::{ResetPhase, ResetState};
pub use toast::{Toast, ToastEvent, ToastState, ERROR_TOAST_MS};
pub use url::UrlState;
