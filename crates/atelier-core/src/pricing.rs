//! # Pricing
//!
//! Unit price of a configured chair: base price plus option surcharges.
//!
//! | Option          | Surcharge |
//! |-----------------|-----------|
//! | leather         | +$80.00   |
//! | fabric          | +$30.00   |
//! | gold legs       | +$60.00   |
//! | black legs      | +$15.00   |
//! | 4D arms         | +$50.00   |
//!
//! Colors never affect the price.

use crate::cart::{ArmStyle, ChairOptions, LegsFinish, Material};
use crate::money::Money;

/// Price of the chair before any option ($399.00).
pub const BASE_PRICE: Money = Money::from_cents(39900);

pub fn material_surcharge(material: Material) -> Money {
    match material {
        Material::Leather => Money::from_cents(8000),
        Material::Fabric => Money::from_cents(3000),
    }
}

pub fn legs_surcharge(legs: LegsFinish) -> Money {
    match legs {
        LegsFinish::Steel => Money::zero(),
        LegsFinish::Black => Money::from_cents(1500),
        LegsFinish::Gold => Money::from_cents(6000),
    }
}

pub fn arms_surcharge(arms: ArmStyle) -> Money {
    match arms {
        ArmStyle::Fixed => Money::zero(),
        ArmStyle::FourD => Money::from_cents(5000),
    }
}

/// Unit price for an option set.
///
/// ## Example
/// ```rust
/// use atelier_core::pricing::price_of_options;
/// use atelier_core::{ArmStyle, ChairOptions, LegsFinish, Material};
///
/// let options = ChairOptions {
///     material: Material::Leather,
///     legs_finish: LegsFinish::Gold,
///     arm_style: ArmStyle::FourD,
///     ..Default::default()
/// };
/// assert_eq!(price_of_options(&options).cents(), 58900);
/// ```
pub fn price_of_options(options: &ChairOptions) -> Money {
    BASE_PRICE
        + material_surcharge(options.material)
        + legs_surcharge(options.legs_finish)
        + arms_surcharge(options.arm_style)
}
