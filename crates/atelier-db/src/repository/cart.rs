//! # Cart Repository
//!
//! The `cart-v2` record, saved on every cart mutation and hydrated once at
//! startup through [`Cart::from_stored`] (keys recomputed, duplicates
//! merged, unreadable items dropped).

use atelier_core::{Cart, CART_STORAGE_KEY};
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::storage::LocalStorageRepository;

/// Repository for the persisted cart.
#[derive(Debug, Clone)]
pub struct CartRepository {
    storage: LocalStorageRepository,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(storage: LocalStorageRepository) -> Self {
        CartRepository { storage }
    }

    /// Loads the stored cart. Missing or unreadable records are `None`.
    pub async fn load(&self) -> DbResult<Option<Cart>> {
        let Some(text) = self.storage.get(CART_STORAGE_KEY).await? else {
            debug!("No stored cart");
            return Ok(None);
        };

        let cart = Cart::from_stored(&text);
        match &cart {
            Some(cart) => debug!(lines = cart.len(), "Hydrated cart"),
            None => warn!("Stored cart is unreadable, ignoring it"),
        }
        Ok(cart)
    }

    /// Saves the cart.
    pub async fn save(&self, cart: &Cart) -> DbResult<()> {
        self.storage.set(CART_STORAGE_KEY, &cart.to_stored()).await
    }
}
