//! # Cart Commands
//!
//! Commands for the cart drawer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_configured_chair  ┌──────────┐                      │
//! │  │  Empty   │───────────────────────►│ In Cart  │◄──┐ same options:    │
//! │  │  Cart    │                        │          │───┘ qty summed       │
//! │  └──────────┘                        └──────────┘                      │
//! │       ▲                                   │ update_quantity (>= 1)     │
//! │       │                                   │ remove_from_cart           │
//! │       └────────── clear_cart ─────────────┘                            │
//! │                                                                         │
//! │  Every mutation saves the whole cart ("cart-v2").                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use atelier_core::{Cart, CartTotals, LineItem};
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{CartState, CustomizerState, DbState, ToastState};

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn of(cart: &CartState) -> Self {
        let rate = cart.tax_rate();
        cart.with_cart(|c| CartResponse {
            items: c.items().to_vec(),
            totals: c.totals(rate),
        })
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::of(cart)
}

/// Adds the chair as currently customized, quantity 1.
///
/// ## Behavior
/// - Same option set already in the cart: that line's quantity goes up
///   and its name, price and preview stay as first added
/// - Otherwise a new line is appended
///
/// ## Returns
/// The line's key and the updated cart
pub async fn add_configured_chair(
    db: &DbState,
    cart: &CartState,
    customizer: &CustomizerState,
    toasts: &ToastState,
    preview: Option<String>,
) -> (String, CartResponse) {
    let item = customizer.with_customizer(|c| c.line_item(preview));
    debug!(price = %item.price, options = ?item.options, "add_configured_chair command");

    let (key, snapshot) = cart.with_cart_mut(|c| {
        let key = c.add(item);
        (key, c.clone())
    });

    db.save_cart(&snapshot, toasts).await;
    toasts.push("Added to cart");
    (key, CartResponse::of(cart))
}

/// Sets a line's quantity from drawer input.
///
/// Input that is not a whole number counts as 1; numbers below 1 are
/// raised to 1.
///
/// ## Errors
/// * `NotFound` - no line has `key`
pub async fn update_quantity(
    db: &DbState,
    cart: &CartState,
    toasts: &ToastState,
    key: &str,
    input: &str,
) -> ApiResult<CartResponse> {
    let qty = parse_quantity(input);
    debug!(key = %key, input = %input, qty = qty, "update_quantity command");

    let snapshot = mutate(cart, key, |c| c.set_quantity(key, qty))?;
    db.save_cart(&snapshot, toasts).await;
    Ok(CartResponse::of(cart))
}

/// Removes a line.
///
/// ## Errors
/// * `NotFound` - no line has `key`
pub async fn remove_from_cart(
    db: &DbState,
    cart: &CartState,
    toasts: &ToastState,
    key: &str,
) -> ApiResult<CartResponse> {
    debug!(key = %key, "remove_from_cart command");

    let snapshot = mutate(cart, key, |c| c.remove(key))?;
    db.save_cart(&snapshot, toasts).await;
    Ok(CartResponse::of(cart))
}

/// Empties the cart.
pub async fn clear_cart(db: &DbState, cart: &CartState, toasts: &ToastState) -> CartResponse {
    debug!("clear_cart command");

    let snapshot = cart.with_cart_mut(|c| {
        c.clear();
        c.clone()
    });
    db.save_cart(&snapshot, toasts).await;
    CartResponse::of(cart)
}

fn mutate<F>(cart: &CartState, key: &str, f: F) -> ApiResult<Cart>
where
    F: FnOnce(&mut Cart) -> bool,
{
    cart.with_cart_mut(|c| {
        if f(c) {
            Ok(c.clone())
        } else {
            Err(ApiError::not_found("Cart item", key))
        }
    })
}

fn parse_quantity(input: &str) -> i64 {
    input.trim().parse::<i64>().unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Harness;
    use crate::error::ErrorCode;
    use atelier_core::{ArmStyle, LegsFinish, Material};

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), 3);
        assert_eq!(parse_quantity(" 12 "), 12);
        assert_eq!(parse_quantity("-4"), -4);
        assert_eq!(parse_quantity("two"), 1);
        assert_eq!(parse_quantity(""), 1);
        assert_eq!(parse_quantity("2.5"), 1);
    }

    #[tokio::test]
    async fn test_add_same_chair_twice_merges() {
        let h = Harness::new().await;
        let (first, _) = add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;
        let (second, response) =
            add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;

        assert_eq!(first, second);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].qty, 2);
        assert_eq!(response.totals.item_count, 2);
        assert_eq!(h.toasts.active().len(), 2);
    }

    #[tokio::test]
    async fn test_different_options_are_separate_lines() {
        let h = Harness::new().await;
        add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;
        h.customizer.with_customizer_mut(|c| {
            c.set_material(Material::Fabric);
            c.set_legs_finish(LegsFinish::Gold);
            c.set_arm_style(ArmStyle::FourD);
        });
        let (_, response) =
            add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;

        assert_eq!(response.items.len(), 2);
        // 39900 + 3000 + 6000 + 5000
        assert_eq!(response.items[1].price.cents(), 53900);
        assert_eq!(response.totals.subtotal.cents(), 47900 + 53900);
    }

    #[tokio::test]
    async fn test_quantity_input() {
        let h = Harness::new().await;
        let (key, _) = add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;

        let response = update_quantity(&h.db, &h.cart, &h.toasts, &key, "5").await.unwrap();
        assert_eq!(response.items[0].qty, 5);

        let response = update_quantity(&h.db, &h.cart, &h.toasts, &key, "0").await.unwrap();
        assert_eq!(response.items[0].qty, 1);

        update_quantity(&h.db, &h.cart, &h.toasts, &key, "7").await.unwrap();
        let response = update_quantity(&h.db, &h.cart, &h.toasts, &key, "lots").await.unwrap();
        assert_eq!(response.items[0].qty, 1);

        let err = update_quantity(&h.db, &h.cart, &h.toasts, "missing", "2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_remove_and_clear_persist() {
        let h = Harness::new().await;
        let (key, _) = add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;
        h.customizer.with_customizer_mut(|c| c.set_material(Material::Fabric));
        add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;

        let response = remove_from_cart(&h.db, &h.cart, &h.toasts, &key).await.unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(h.db.inner().cart().load().await.unwrap().unwrap().len(), 1);

        let err = remove_from_cart(&h.db, &h.cart, &h.toasts, &key).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let response = clear_cart(&h.db, &h.cart, &h.toasts).await;
        assert!(response.items.is_empty());
        assert_eq!(response.totals.total.cents(), 0);
        assert!(h.db.inner().cart().load().await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_shows_notice() {
        let h = Harness::new().await;
        h.db.inner().close().await;

        let (key, response) =
            add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, None).await;
        assert_eq!(response.items.len(), 1);
        clear_cart(&h.db, &h.cart, &h.toasts).await;

        let messages: Vec<_> = h.toasts.active().into_iter().map(|t| t.message).collect();
        assert_eq!(
            messages,
            vec![crate::state::SAVE_CART_FAILED, "Added to cart", crate::state::SAVE_CART_FAILED]
        );
        assert!(h.cart.with_cart(|c| c.find(&key).is_none()));
    }

    #[tokio::test]
    async fn test_preview_kept_from_first_add() {
        let h = Harness::new().await;
        add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, Some("a.svg".into())).await;
        let (_, response) =
            add_configured_chair(&h.db, &h.cart, &h.customizer, &h.toasts, Some("b.svg".into()))
                .await;
        assert_eq!(response.items[0].preview.as_deref(), Some("a.svg"));
    }
}
