//! # Configuration Types
//!
//! The style `Configuration` that drives the live preview.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Configuration                                   │
//! │                                                                         │
//! │  ┌────────────────┐ ┌────────────────┐ ┌────────────────┐              │
//! │  │  typography    │ │    button      │ │    gallery     │              │
//! │  │  family        │ │  radius 0..32  │ │  align         │              │
//! │  │  weight 100..  │ │  shadow        │ │  gap 0..40     │              │
//! │  │  size 10..60   │ │  align         │ │  radius 0..32  │              │
//! │  │  unit px|rem   │ │  bg, color     │ └────────────────┘              │
//! │  └────────────────┘ │  autoContrast  │                                  │
//! │                     └────────────────┘                                  │
//! │  ┌────────────────────────┐ ┌────────────────┐                         │
//! │  │  layout                │ │    stroke      │                         │
//! │  │  cardRadius 0..32      │ │  color         │                         │
//! │  │  containerPadding 0..64│ │  weight 0..6   │                         │
//! │  │  sectionBg, variant    │ └────────────────┘                         │
//! │  │  dark                  │                                             │
//! │  └────────────────────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! Every value of these types that leaves [`crate::validation::validate`]
//! has all fields populated and within their domain. The struct fields are
//! public for ergonomic editing; external data must go through the validator.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Domain Bounds
// =============================================================================

/// Inclusive bounds of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    const fn new(min: u32, max: u32) -> Self {
        Bounds { min, max }
    }

    /// Returns true when `value` lies within the bounds.
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const FONT_WEIGHT: Bounds = Bounds::new(100, 900);
pub const FONT_SIZE: Bounds = Bounds::new(10, 60);
pub const BUTTON_RADIUS: Bounds = Bounds::new(0, 32);
pub const GALLERY_GAP: Bounds = Bounds::new(0, 40);
pub const GALLERY_RADIUS: Bounds = Bounds::new(0, 32);
pub const CARD_RADIUS: Bounds = Bounds::new(0, 32);
pub const CONTAINER_PADDING: Bounds = Bounds::new(0, 64);
pub const STROKE_WEIGHT: Bounds = Bounds::new(0, 6);

// =============================================================================
// Enumerated Fields
// =============================================================================

/// A closed set of string values.
///
/// Implemented by every enum field so the validator can check membership
/// against the same strings serde uses.
pub trait Choice: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The wire name of this member.
    fn as_str(&self) -> &'static str;

    /// Looks up a member by its exact wire name.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// Font size unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FontUnit {
    #[default]
    Px,
    Rem,
}

impl Choice for FontUnit {
    const ALL: &'static [Self] = &[FontUnit::Px, FontUnit::Rem];

    fn as_str(&self) -> &'static str {
        match self {
            FontUnit::Px => "px",
            FontUnit::Rem => "rem",
        }
    }
}

/// Button drop shadow preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ShadowSize {
    None,
    Small,
    #[default]
    Medium,
    Large,
}

impl ShadowSize {
    /// The CSS `box-shadow` value of this preset.
    pub fn css(&self) -> &'static str {
        match self {
            ShadowSize::None => "none",
            ShadowSize::Small => "0 1px 3px rgba(0,0,0,.12)",
            ShadowSize::Medium => "0 6px 16px rgba(0,0,0,.15)",
            ShadowSize::Large => "0 12px 32px rgba(0,0,0,.2)",
        }
    }
}

impl Choice for ShadowSize {
    const ALL: &'static [Self] = &[
        ShadowSize::None,
        ShadowSize::Small,
        ShadowSize::Medium,
        ShadowSize::Large,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ShadowSize::None => "none",
            ShadowSize::Small => "small",
            ShadowSize::Medium => "medium",
            ShadowSize::Large => "large",
        }
    }
}

/// Horizontal alignment, shared by the call-to-action row and the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Flexbox `justify-content` value (call-to-action row).
    pub fn flex_justify(&self) -> &'static str {
        match self {
            Alignment::Left => "flex-start",
            Alignment::Center => "center",
            Alignment::Right => "flex-end",
        }
    }

    /// Grid `justify-content` value (gallery).
    pub fn grid_justify(&self) -> &'static str {
        match self {
            Alignment::Left => "start",
            Alignment::Center => "center",
            Alignment::Right => "end",
        }
    }
}

impl Choice for Alignment {
    const ALL: &'static [Self] = &[Alignment::Left, Alignment::Center, Alignment::Right];

    fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Product page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Viewer and option panel side by side.
    #[default]
    Split,
    /// Option panel below the viewer.
    Stacked,
}

impl Choice for LayoutVariant {
    const ALL: &'static [Self] = &[LayoutVariant::Split, LayoutVariant::Stacked];

    fn as_str(&self) -> &'static str {
        match self {
            LayoutVariant::Split => "split",
            LayoutVariant::Stacked => "stacked",
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Typography settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// CSS font-family list. Never empty.
    pub family: String,
    pub weight: u32,
    pub size: u32,
    pub unit: FontUnit,
}

/// Call-to-action button styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    pub radius: u32,
    pub shadow: ShadowSize,
    pub align: Alignment,
    pub bg: String,
    pub color: String,
    /// Pick white or near-black text from `bg` instead of using `color`.
    pub auto_contrast: bool,
}

/// Environment gallery layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GalleryStyle {
    pub align: Alignment,
    pub gap: u32,
    pub radius: u32,
}

/// Page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStyle {
    pub card_radius: u32,
    pub container_padding: u32,
    pub section_bg: String,
    pub variant: LayoutVariant,
    pub dark: bool,
}

/// Border stroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    pub color: String,
    pub weight: u32,
}

/// The complete set of validated style parameters.
///
/// Serializes to the camelCase JSON shape used by exports, URL tokens and
/// local storage; sections appear in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Configuration {
    pub typography: Typography,
    pub button: ButtonStyle,
    pub gallery: GalleryStyle,
    pub layout: LayoutStyle,
    pub stroke: StrokeStyle,
}

pub const DEFAULT_FONT_FAMILY: &str =
    "Inter, system-ui, -apple-system, Segoe UI, Roboto, Ubuntu, Cantarell, \"Helvetica Neue\", Arial";

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            typography: Typography {
                family: DEFAULT_FONT_FAMILY.to_string(),
                weight: 500,
                size: 16,
                unit: FontUnit::Px,
            },
            button: ButtonStyle {
                radius: 10,
                shadow: ShadowSize::Medium,
                align: Alignment::Right,
                bg: "#b66756".to_string(),
                color: "#ffffff".to_string(),
                auto_contrast: true,
            },
            gallery: GalleryStyle {
                align: Alignment::Left,
                gap: 12,
                radius: 12,
            },
            layout: LayoutStyle {
                card_radius: 14,
                container_padding: 24,
                section_bg: "#ffffff".to_string(),
                variant: LayoutVariant::Split,
                dark: false,
            },
            stroke: StrokeStyle {
                color: "#e5e7eb".to_string(),
                weight: 1,
            },
        }
    }
}

impl Configuration {
    /// Checks every field against its domain.
    ///
    /// Always true for values produced by the validator; used by tests and
    /// as a debug assertion at the store boundary.
    pub fn is_within_domain(&self) -> bool {
        !self.typography.family.is_empty()
            && FONT_WEIGHT.contains(self.typography.weight)
            && FONT_SIZE.contains(self.typography.size)
            && BUTTON_RADIUS.contains(self.button.radius)
            && !self.button.bg.is_empty()
            && !self.button.color.is_empty()
            && GALLERY_GAP.contains(self.gallery.gap)
            && GALLERY_RADIUS.contains(self.gallery.radius)
            && CARD_RADIUS.contains(self.layout.card_radius)
            && CONTAINER_PADDING.contains(self.layout.container_padding)
            && !self.layout.section_bg.is_empty()
            && !self.stroke.color.is_empty()
            && STROKE_WEIGHT.contains(self.stroke.weight)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_within_domain() {
        assert!(Configuration::default().is_within_domain());
    }

    #[test]
    fn test_json_shape_is_camel_case_in_section_order() {
        let json = serde_json::to_string(&Configuration::default()).unwrap();
        assert!(json.starts_with(r#"{"typography":{"family":"Inter"#));
        assert!(json.contains(r#""autoContrast":true"#));
        assert!(json.contains(r#""cardRadius":14"#));
        assert!(json.contains(r#""containerPadding":24"#));
        assert!(json.contains(r##""sectionBg":"#ffffff""##));

        let order: Vec<usize> = ["typography", "button", "gallery", "layout", "stroke"]
            .iter()
            .map(|s| json.find(&format!("\"{}\":", s)).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_choice_parse_matches_serde_names() {
        for shadow in ShadowSize::ALL {
            let json = serde_json::to_string(shadow).unwrap();
            assert_eq!(json, format!("\"{}\"", shadow.as_str()));
            assert_eq!(ShadowSize::parse(shadow.as_str()), Some(*shadow));
        }
        assert_eq!(FontUnit::parse("rem"), Some(FontUnit::Rem));
        assert_eq!(FontUnit::parse("REM"), None);
        assert_eq!(LayoutVariant::parse("stacked"), Some(LayoutVariant::Stacked));
    }

    #[test]
    fn test_alignment_justification() {
        assert_eq!(Alignment::Right.flex_justify(), "flex-end");
        assert_eq!(Alignment::Right.grid_justify(), "end");
        assert_eq!(Alignment::Center.flex_justify(), "center");
    }
}
