//! # Validation Module
//!
//! Turns untrusted JSON into a well-formed [`Configuration`].
//!
//! ## Where Untrusted Input Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      External → Internal Transitions                    │
//! │                                                                         │
//! │  Shared link  (#cfg=...)  ──┐                                          │
//! │  Imported file (.json)    ──┼──► validate(raw) ──► Configuration       │
//! │  Local storage record     ──┘        ▲                                  │
//! │                                      │                                  │
//! │                          defaults fill every gap                        │
//! │                                                                         │
//! │  The validator NEVER fails: partial or malformed input degrades to     │
//! │  defaults field by field instead of raising an error.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Rules
//! | Kind    | Accepted                                   | Otherwise       |
//! |---------|--------------------------------------------|-----------------|
//! | integer | JSON number or numeric string, rounded, clamped | default    |
//! | enum    | exact member name                          | default         |
//! | boolean | any non-null value, by JS truthiness       | default on null |
//! | string  | non-empty string                           | default         |
//!
//! ## Usage
//! ```rust
//! use atelier_core::validation::validate;
//! use atelier_core::Choice;
//! use serde_json::json;
//!
//! let config = validate(&json!({ "button": { "radius": 999 } }));
//! assert_eq!(config.button.radius, 32);
//! assert_eq!(config.button.shadow.as_str(), "medium");
//! ```

use serde_json::{Map, Value};

use crate::config::*;

// =============================================================================
// Validator
// =============================================================================

/// Produces a fully valid configuration from arbitrary JSON.
///
/// ## Algorithm
/// 1. Start from [`Configuration::default`]
/// 2. For each section that is a JSON object in `raw`, overlay only the
///    recognized fields, each constrained to its domain
/// 3. Everything else keeps the default
///
/// Pure: same input, same output, no side effects.
pub fn validate(raw: &Value) -> Configuration {
    let mut safe = Configuration::default();

    if let Some(t) = section(raw, "typography") {
        overlay_string(&mut safe.typography.family, t.get("family"));
        overlay_integer(&mut safe.typography.weight, t.get("weight"), FONT_WEIGHT);
        overlay_integer(&mut safe.typography.size, t.get("size"), FONT_SIZE);
        overlay_choice(&mut safe.typography.unit, t.get("unit"));
    }

    if let Some(b) = section(raw, "button") {
        overlay_integer(&mut safe.button.radius, b.get("radius"), BUTTON_RADIUS);
        overlay_choice(&mut safe.button.shadow, b.get("shadow"));
        overlay_choice(&mut safe.button.align, b.get("align"));
        overlay_string(&mut safe.button.bg, b.get("bg"));
        overlay_string(&mut safe.button.color, b.get("color"));
        overlay_bool(&mut safe.button.auto_contrast, b.get("autoContrast"));
    }

    if let Some(g) = section(raw, "gallery") {
        overlay_choice(&mut safe.gallery.align, g.get("align"));
        overlay_integer(&mut safe.gallery.gap, g.get("gap"), GALLERY_GAP);
        overlay_integer(&mut safe.gallery.radius, g.get("radius"), GALLERY_RADIUS);
    }

    if let Some(l) = section(raw, "layout") {
        overlay_integer(&mut safe.layout.card_radius, l.get("cardRadius"), CARD_RADIUS);
        overlay_integer(
            &mut safe.layout.container_padding,
            l.get("containerPadding"),
            CONTAINER_PADDING,
        );
        overlay_string(&mut safe.layout.section_bg, l.get("sectionBg"));
        overlay_choice(&mut safe.layout.variant, l.get("variant"));
        overlay_bool(&mut safe.layout.dark, l.get("dark"));
    }

    if let Some(s) = section(raw, "stroke") {
        overlay_string(&mut safe.stroke.color, s.get("color"));
        overlay_integer(&mut safe.stroke.weight, s.get("weight"), STROKE_WEIGHT);
    }

    safe
}

/// Sets one field by dotted path (`"button.radius"`) and re-validates.
///
/// The editor's write path: the current configuration is taken to its JSON
/// form, the value is written at `path`, and the result goes back through
/// [`validate`]. Unknown paths leave the configuration unchanged; values
/// outside the domain are constrained like any other input.
///
/// ## Example
/// ```rust
/// use atelier_core::validation::apply_path;
/// use atelier_core::Configuration;
/// use serde_json::json;
///
/// let next = apply_path(&Configuration::default(), "stroke.weight", json!(9));
/// assert_eq!(next.stroke.weight, 6);
/// ```
pub fn apply_path(current: &Configuration, path: &str, value: Value) -> Configuration {
    let mut raw = match serde_json::to_value(current) {
        Ok(raw) => raw,
        Err(_) => return current.clone(),
    };

    let pointer = format!("/{}", path.replace('.', "/"));
    match raw.pointer_mut(&pointer) {
        Some(slot) => *slot = value,
        None => return current.clone(),
    }

    validate(&raw)
}

// =============================================================================
// Field Overlays
// =============================================================================

fn section<'a>(raw: &'a Value, name: &str) -> Option<&'a Map<String, Value>> {
    raw.get(name)?.as_object()
}

fn overlay_integer(target: &mut u32, value: Option<&Value>, bounds: Bounds) {
    if let Some(n) = value.and_then(coerce_number) {
        *target = clamp_to(n, bounds);
    }
}

fn overlay_choice<T: Choice>(target: &mut T, value: Option<&Value>) {
    if let Some(choice) = value.and_then(Value::as_str).and_then(T::parse) {
        *target = choice;
    }
}

fn overlay_bool(target: &mut bool, value: Option<&Value>) {
    match value {
        None | Some(Value::Null) => {}
        Some(v) => *target = truthy(v),
    }
}

fn overlay_string(target: &mut String, value: Option<&Value>) {
    if let Some(Value::String(s)) = value {
        if !s.is_empty() {
            *target = s.clone();
        }
    }
}

// =============================================================================
// Coercions
// =============================================================================

/// Numbers and numeric strings; everything else is "not a number".
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn clamp_to(n: f64, bounds: Bounds) -> u32 {
    n.round().clamp(bounds.min as f64, bounds.max as f64) as u32
}

/// JavaScript truthiness for JSON values.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
