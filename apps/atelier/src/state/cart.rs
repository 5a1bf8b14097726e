//! # Cart State
//!
//! The session's cart, behind a mutex, plus the tax rate the drawer
//! totals are computed with.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shell word          Command                   Cart change              │
//! │  ──────────          ───────                   ───────────              │
//! │  add       ────────► add_configured_chair() ──► add (merge by key)     │
//! │  qty k n   ────────► update_quantity() ───────► set_quantity (>= 1)    │
//! │  remove k  ────────► remove_from_cart() ──────► remove                 │
//! │  clear     ────────► clear_cart() ────────────► clear                  │
//! │  cart      ────────► get_cart() ──────────────► (read only)            │
//! │                                                                         │
//! │  Every write is followed by a save of the whole cart.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use atelier_core::{Cart, CartTotals, TaxRate};

/// Shared cart handle.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    tax_rate: TaxRate,
}

impl CartState {
    /// Wraps a hydrated (or empty) cart.
    pub fn new(cart: Cart, tax_rate: TaxRate) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
            tax_rate,
        }
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let key = cart_state.with_cart_mut(|cart| cart.add(item));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Drawer totals at this state's tax rate.
    pub fn totals(&self) -> CartTotals {
        let rate = self.tax_rate;
        self.with_cart(|cart| cart.totals(rate))
    }
}

impl Default for CartState {
    fn default() -> Self {
        CartState::new(Cart::new(), TaxRate::default())
    }
}
