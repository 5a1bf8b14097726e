//! # Style Variables
//!
//! Maps a [`Configuration`] onto CSS custom properties.
//!
//! Two flavors exist and they differ on purpose:
//!
//! | Variable       | Preview ([`style_vars`])          | Clipboard ([`css_variables_block`]) |
//! |----------------|-----------------------------------|-------------------------------------|
//! | `--btn-shadow` | resolved `box-shadow` value       | preset name (`medium`)              |
//! | `--btn-color`  | auto-contrast color when enabled  | configured `button.color`           |
//!
//! The clipboard block mirrors the configuration as saved; the preview shows
//! what the page actually renders.

use crate::color::auto_text_color;
use crate::config::{Choice, Configuration};

/// A CSS custom property and its value.
pub type StyleVar = (&'static str, String);

/// Button text color as rendered.
pub fn button_text_color(config: &Configuration) -> String {
    if config.button.auto_contrast {
        auto_text_color(&config.button.bg).to_string()
    } else {
        config.button.color.clone()
    }
}

/// Custom properties applied to the preview root.
pub fn style_vars(config: &Configuration) -> Vec<StyleVar> {
    variables(
        config,
        config.button.shadow.css().to_string(),
        button_text_color(config),
    )
}

/// The `:root{...}` block copied by "Copy CSS variables".
///
/// ## Example
/// ```rust
/// use atelier_core::style::css_variables_block;
/// use atelier_core::Configuration;
///
/// let css = css_variables_block(&Configuration::default());
/// assert!(css.starts_with(":root{\n  --ff:Inter"));
/// assert!(css.contains("  --btn-shadow:medium;\n"));
/// assert!(css.ends_with("  --stroke-weight:1px;\n}"));
/// ```
pub fn css_variables_block(config: &Configuration) -> String {
    let vars = variables(
        config,
        config.button.shadow.as_str().to_string(),
        config.button.color.clone(),
    );

    let mut css = String::from(":root{\n");
    for (name, value) in vars {
        css.push_str(&format!("  {}:{};\n", name, value));
    }
    css.push('}');
    css
}

fn variables(config: &Configuration, shadow: String, button_color: String) -> Vec<StyleVar> {
    let px = |n: u32| format!("{}px", n);
    let t = &config.typography;

    vec![
        ("--ff", t.family.clone()),
        ("--fw", t.weight.to_string()),
        ("--fs", format!("{}{}", t.size, t.unit.as_str())),
        ("--btn-radius", px(config.button.radius)),
        ("--btn-shadow", shadow),
        ("--btn-bg", config.button.bg.clone()),
        ("--btn-color", button_color),
        ("--gallery-gap", px(config.gallery.gap)),
        ("--gallery-radius", px(config.gallery.radius)),
        ("--card-radius", px(config.layout.card_radius)),
        ("--container-padding", px(config.layout.container_padding)),
        ("--section-bg", config.layout.section_bg.clone()),
        ("--stroke-color", config.stroke.color.clone()),
        ("--stroke-weight", px(config.stroke.weight)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FontUnit, ShadowSize};

    fn lookup<'a>(vars: &'a [StyleVar], name: &str) -> &'a str {
        vars.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_css_block_has_fourteen_declarations() {
        let css = css_variables_block(&Configuration::default());
        assert_eq!(css.lines().count(), 16);
        assert_eq!(css.matches("--").count(), 14);
    }

    #[test]
    fn test_css_block_uses_saved_values() {
        let mut config = Configuration::default();
        config.typography.size = 2;
        config.typography.unit = FontUnit::Rem;
        config.button.color = "#123456".to_string();

        let css = css_variables_block(&config);
        assert!(css.contains("  --fs:2rem;\n"));
        assert!(css.contains("  --btn-color:#123456;\n"));
        assert!(css.contains("  --container-padding:24px;\n"));
    }

    #[test]
    fn test_preview_resolves_shadow_and_auto_contrast() {
        let mut config = Configuration::default();
        config.button.bg = "#f1c40f".to_string();
        config.button.shadow = ShadowSize::Large;

        let vars = style_vars(&config);
        assert_eq!(vars.len(), 14);
        assert_eq!(lookup(&vars, "--btn-shadow"), "0 12px 32px rgba(0,0,0,.2)");
        assert_eq!(lookup(&vars, "--btn-color"), "#111827");

        config.button.auto_contrast = false;
        let vars = style_vars(&config);
        assert_eq!(lookup(&vars, "--btn-color"), "#ffffff");
    }
}
