//! # atelier-core: Pure Configuration Engine
//!
//! This crate is the **heart** of Atelier. It contains the configuration
//! state engine and the cart logic as pure functions and plain data, with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (apps/atelier)                         │   │
//! │  │   Editor ──► Preview vars ──► Customizer ──► Cart drawer        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ atelier-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌─────────┐ ┌───────┐ ┌──────────┐  │   │
//! │  │  │validation│ │  store   │ │  codec  │ │ cart  │ │ pricing  │  │   │
//! │  │  │ validate │ │ History  │ │ URL/file│ │ Cart  │ │ Money    │  │   │
//! │  │  │          │ │ ConfigSt.│ │ tokens  │ │ keys  │ │ color    │  │   │
//! │  │  └──────────┘ └──────────┘ └─────────┘ └───────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TIMERS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  atelier-db (local storage)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - The style `Configuration` and its enums
//! - [`validation`] - Untrusted JSON → always-valid `Configuration`
//! - [`history`] / [`store`] - Bounded undo/redo and the configuration store
//! - [`codec`] - URL token and JSON file encodings
//! - [`cart`] - Line items, fingerprints, merge-on-add
//! - [`pricing`] / [`money`] - Option surcharges, integer money
//! - [`color`] / [`style`] - Contrast-safe text color, CSS variables
//! - [`customizer`] - Chair option picker state
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::{codec, validation, ConfigStore, Configuration};
//!
//! let mut store = ConfigStore::new(Configuration::default());
//! store.change(|mut c| {
//!     c.button.radius = 20;
//!     c
//! });
//!
//! let token = codec::encode(store.current());
//! let raw = codec::decode_or_none(&token).unwrap();
//! assert_eq!(&validation::validate(&raw), store.current());
//!
//! store.undo();
//! assert_eq!(store.current().button.radius, 10);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod codec;
pub mod color;
pub mod config;
pub mod customizer;
pub mod error;
pub mod history;
pub mod money;
pub mod pricing;
pub mod store;
pub mod style;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{
    ArmStyle, Cart, CartTotals, ChairOptions, LegsFinish, LineItem, Material, NewLineItem,
};
pub use config::*;
pub use customizer::ChairCustomizer;
pub use error::{CoreError, CoreResult};
pub use history::History;
pub use money::{Money, TaxRate};
pub use store::ConfigStore;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of undo snapshots kept by the configuration store.
pub const HISTORY_LIMIT: usize = 50;

/// Quiescence window before the URL fragment is rewritten, in milliseconds.
pub const URL_DEBOUNCE_MS: u64 = 300;

/// Prefix of the URL fragment carrying an encoded configuration.
pub const URL_FRAGMENT_PREFIX: &str = "#cfg=";

/// File name used when exporting the configuration.
pub const EXPORT_FILE_NAME: &str = "ui-config.json";

/// Local storage key of the configuration record.
pub const CONFIG_STORAGE_KEY: &str = "ui-config";

/// Local storage key of the cart record.
pub const CART_STORAGE_KEY: &str = "cart-v2";

/// Sales tax applied in the cart drawer (800 bps = 8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;
