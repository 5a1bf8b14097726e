//! # Chair Customizer
//!
//! Picker state behind the product showcase: material, swatch colors, arms
//! and legs. Produces the option set and the line item for add-to-cart.
//!
//! ```text
//!   set_material(Fabric) ──► cushion = FABRIC_PALETTE[2]
//!   set_material(Leather) ─► cushion = LEATHER_PALETTE[4]
//!
//!   options() ──► ChairOptions ──► price_of_options ──► NewLineItem (qty 1)
//! ```
//!
//! Arm color is purely visual; it is not part of the option set and so
//! never splits cart lines.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{ArmStyle, ChairOptions, LegsFinish, Material, NewLineItem};
use crate::money::Money;
use crate::pricing::price_of_options;

pub const PRODUCT_NAME: &str = "Cozy Lounge Chair";

pub const LEATHER_PALETTE: [&str; 10] = [
    "#6b5a55", "#6b7258", "#547063", "#645a77", "#7d5d76", "#3f5e7a", "#a14f44", "#5e1f1a",
    "#307a60", "#5c4a3b",
];
pub const FABRIC_PALETTE: [&str; 5] = ["#e7d6d2", "#c3d2c2", "#d8d7e9", "#c9d7e9", "#ddd0bf"];
pub const ARM_PALETTE: [&str; 4] = ["#5c4a3b", "#3d3d3d", "#8b5e34", "#6f7b83"];
pub const PIPING_PALETTE: [&str; 4] = ["#ffffff", "#111827", "#f1c40f", "#22c55e"];

/// Cushion palette offered for a material.
pub fn cushion_palette(material: Material) -> &'static [&'static str] {
    match material {
        Material::Leather => &LEATHER_PALETTE,
        Material::Fabric => &FABRIC_PALETTE,
    }
}

/// Cushion color selected when switching to `material`.
pub fn default_cushion(material: Material) -> &'static str {
    match material {
        Material::Leather => LEATHER_PALETTE[4],
        Material::Fabric => FABRIC_PALETTE[2],
    }
}

/// Current picker selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChairCustomizer {
    material: Material,
    cushion_color: String,
    arm_style: ArmStyle,
    arm_color: String,
    piping_color: String,
    legs_finish: LegsFinish,
}

impl Default for ChairCustomizer {
    fn default() -> Self {
        ChairCustomizer {
            material: Material::Leather,
            cushion_color: default_cushion(Material::Leather).to_string(),
            arm_style: ArmStyle::Fixed,
            arm_color: ARM_PALETTE[0].to_string(),
            piping_color: PIPING_PALETTE[0].to_string(),
            legs_finish: LegsFinish::Steel,
        }
    }
}

impl ChairCustomizer {
    /// Switches material and resets the cushion to that material's default.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.cushion_color = default_cushion(material).to_string();
    }

    /// Picks a cushion swatch. Only colors from the current material's
    /// palette are accepted; returns false otherwise.
    pub fn set_cushion_color(&mut self, color: &str) -> bool {
        pick(&mut self.cushion_color, cushion_palette(self.material), color)
    }

    pub fn set_arm_style(&mut self, arm_style: ArmStyle) {
        self.arm_style = arm_style;
    }

    pub fn set_arm_color(&mut self, color: &str) -> bool {
        pick(&mut self.arm_color, &ARM_PALETTE, color)
    }

    pub fn set_piping_color(&mut self, color: &str) -> bool {
        pick(&mut self.piping_color, &PIPING_PALETTE, color)
    }

    pub fn set_legs_finish(&mut self, legs_finish: LegsFinish) {
        self.legs_finish = legs_finish;
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn arm_color(&self) -> &str {
        &self.arm_color
    }

    /// The option set identifying this chair in the cart.
    pub fn options(&self) -> ChairOptions {
        ChairOptions {
            material: self.material,
            cushion_color: Some(self.cushion_color.clone()),
            arm_style: self.arm_style,
            legs_finish: self.legs_finish,
            piping_color: Some(self.piping_color.clone()),
        }
    }

    pub fn price(&self) -> Money {
        price_of_options(&self.options())
    }

    /// The item added by "Add to cart": quantity 1 at the current price.
    pub fn line_item(&self, preview: Option<String>) -> NewLineItem {
        NewLineItem {
            name: PRODUCT_NAME.to_string(),
            price: self.price(),
            qty: 1,
            options: self.options(),
            preview,
        }
    }
}

// Palette comparison ignores case and surrounding whitespace; the stored
// value is always the palette's spelling.
fn pick(slot: &mut String, palette: &[&str], color: &str) -> bool {
    let color = color.trim();
    match palette.iter().find(|c| c.eq_ignore_ascii_case(color)) {
        Some(swatch) => {
            *slot = swatch.to_string();
            true
        }
        None => false,
    }
}
