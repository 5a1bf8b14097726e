//! # Cart
//!
//! Line items keyed by a deterministic fingerprint of their option set.
//!
//! ## Merge on Add
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cart.add(item)                                 │
//! │                                                                         │
//! │  options ──► canonical JSON (sorted keys) ──► 31-hash ──► key "1a2b…"  │
//! │                                                                         │
//! │  key already in cart?                                                   │
//! │     ├── yes ──► existing.qty += item.qty   (name/price/preview kept)   │
//! │     └── no  ──► push new LineItem { key, .. }                          │
//! │                                                                         │
//! │  Invariants: keys unique, qty ≥ 1, insertion order preserved           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Form
//! `{"items":[{"key":…,"name":…,"price":47900,"qty":1,"options":{…}}]}`
//!
//! Hydration never trusts stored keys: every readable item goes back
//! through [`Cart::add`], which recomputes the key, merges duplicates and
//! clamps quantities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::config::Choice;
use crate::money::{Money, TaxRate};

// =============================================================================
// Option Set
// =============================================================================

/// Upholstery material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    #[default]
    Leather,
    Fabric,
}

impl Choice for Material {
    const ALL: &'static [Self] = &[Material::Leather, Material::Fabric];

    fn as_str(&self) -> &'static str {
        match self {
            Material::Leather => "leather",
            Material::Fabric => "fabric",
        }
    }
}

/// Armrest mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ArmStyle {
    #[default]
    Fixed,
    /// Height, depth, width and pivot adjustable.
    #[serde(rename = "4D")]
    FourD,
}

impl Choice for ArmStyle {
    const ALL: &'static [Self] = &[ArmStyle::Fixed, ArmStyle::FourD];

    fn as_str(&self) -> &'static str {
        match self {
            ArmStyle::Fixed => "Fixed",
            ArmStyle::FourD => "4D",
        }
    }
}

/// Leg finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LegsFinish {
    #[default]
    Steel,
    Black,
    Gold,
}

impl Choice for LegsFinish {
    const ALL: &'static [Self] = &[LegsFinish::Steel, LegsFinish::Black, LegsFinish::Gold];

    fn as_str(&self) -> &'static str {
        match self {
            LegsFinish::Steel => "steel",
            LegsFinish::Black => "black",
            LegsFinish::Gold => "gold",
        }
    }
}

/// The option set that identifies a configured chair.
///
/// Colors are optional so an option set can be built from material, arms
/// and legs alone; an absent color is simply not part of the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChairOptions {
    pub material: Material,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cushion_color: Option<String>,
    pub arm_style: ArmStyle,
    pub legs_finish: LegsFinish,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub piping_color: Option<String>,
}

// =============================================================================
// Fingerprint
// =============================================================================

/// Deterministic identity of an option set.
///
/// ## Algorithm
/// 1. Serialize the options to compact JSON with keys sorted at every level
/// 2. `h = h * 31 + unit` over the UTF-16 code units, wrapping at 32 bits
/// 3. Render `h` as lowercase hex
///
/// Structurally equal option sets always share a key; distinct sets
/// collide only with 32-bit hash probability.
pub fn fingerprint(options: &ChairOptions) -> String {
    let value = serde_json::to_value(options).unwrap_or(Value::Null);
    let canonical = canonical_json(&value);

    let hash = canonical
        .encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as u32));
    format!("{:x}", hash)
}

/// Compact JSON with object keys sorted recursively.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", Value::String(k.clone()), canonical_json(&map[k])))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        scalar => scalar.to_string(),
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// An item on its way into the cart (no key yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewLineItem {
    pub name: String,
    /// Unit price.
    pub price: Money,
    pub qty: u32,
    pub options: ChairOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub preview: Option<String>,
}

/// A cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// `fingerprint(options)`; unique within the cart.
    pub key: String,
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Always ≥ 1.
    pub qty: u32,
    pub options: ChairOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub preview: Option<String>,
}

impl LineItem {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty as i64)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// Items are private: every mutation goes through methods that keep keys
/// unique and quantities ≥ 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds an item, merging into an existing line with the same options.
    ///
    /// ## Behavior
    /// - Existing key: quantity summed; name, price and preview of the
    ///   existing line are kept
    /// - New key: appended with `qty` raised to at least 1
    ///
    /// Returns the key of the affected line.
    pub fn add(&mut self, item: NewLineItem) -> String {
        let key = fingerprint(&item.options);
        let qty = item.qty.max(1);

        if let Some(existing) = self.items.iter_mut().find(|i| i.key == key) {
            existing.qty = existing.qty.saturating_add(qty);
            return key;
        }

        self.items.push(LineItem {
            key: key.clone(),
            name: item.name,
            price: item.price,
            qty,
            options: item.options,
            preview: item.preview,
        });
        key
    }

    /// Sets a line's quantity, clamped to at least 1.
    ///
    /// Returns false (and changes nothing) when no line has `key`.
    pub fn set_quantity(&mut self, key: &str, qty: i64) -> bool {
        match self.items.iter_mut().find(|i| i.key == key) {
            Some(item) => {
                item.qty = qty.clamp(1, u32::MAX as i64) as u32;
                true
            }
            None => false,
        }
    }

    /// Removes a line. Returns false when no line has `key`.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.key != key);
        self.items.len() != before
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn find(&self, key: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.key == key)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities (the cart badge).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| i.qty as u64).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Subtotal, tax on the subtotal, and total.
    pub fn totals(&self, rate: TaxRate) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.calculate_tax(rate);
        CartTotals {
            line_count: self.len(),
            item_count: self.item_count(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// JSON text for the `cart-v2` record.
    pub fn to_stored(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"items":[]}"#.to_string())
    }

    /// Rebuilds a cart from a stored record.
    ///
    /// Returns `None` when the text is not a JSON object with an `items`
    /// array. Individual unreadable items are skipped; the rest are
    /// re-added so keys are recomputed and duplicates merged.
    pub fn from_stored(text: &str) -> Option<Cart> {
        let record: Map<String, Value> = serde_json::from_str(text).ok()?;
        let items = record.get("items")?.as_array()?;

        let mut cart = Cart::new();

        for raw in items {
            if let Ok(stored) = serde_json::from_value::<StoredLineItem>(raw.clone()) {
                cart.add(stored.into_new_item());
            }
        }
        Some(cart)
    }
}

/// Lenient view of a persisted line: the key is ignored and any integer
/// quantity is accepted (then clamped by `add`).
#[derive(Deserialize)]
struct StoredLineItem {
    name: String,
    price: Money,
    #[serde(default = "default_stored_qty")]
    qty: i64,
    options: ChairOptions,
    #[serde(default)]
    preview: Option<String>,
}

fn default_stored_qty() -> i64 {
    1
}

impl StoredLineItem {
    fn into_new_item(self) -> NewLineItem {
        NewLineItem {
            name: self.name,
            price: self.price,
            qty: self.qty.clamp(1, u32::MAX as i64) as u32,
            options: self.options,
            preview: self.preview,
        }
    }
}

/// Cart totals summary for the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub item_count: u64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
