//! # Repository Module
//!
//! Local storage repositories.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ConfigRepository            CartRepository                            │
//! │  load() → Option<Configuration>   load() → Option<Cart>               │
//! │  save(&Configuration)             save(&Cart)                          │
//! │       │   key "ui-config"              │   key "cart-v2"               │
//! │       └──────────────┬─────────────────┘                               │
//! │                      ▼                                                  │
//! │            LocalStorageRepository                                       │
//! │            get / set   (raw JSON text)                                 │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │            table local_storage                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`storage::LocalStorageRepository`] - Raw keyed records
//! - [`config::ConfigRepository`] - The validated style configuration
//! - [`cart::CartRepository`] - The cart

pub mod cart;
pub mod config;
pub mod storage;
