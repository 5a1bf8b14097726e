//! # Color Utilities
//!
//! Just enough color math to keep button text readable: parse a CSS color,
//! compute WCAG relative luminance and contrast, pick a text color.
//!
//! ```text
//!   "#b66756" ──► [182,103,86] ──► L = 0.19
//!                                    │
//!          contrast vs #ffffff = 4.4 ┤ ◄── wins (ties go to white)
//!          contrast vs #111827 = 4.1 ┘
//! ```

/// An sRGB triple.
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];

/// Tailwind slate-900, the dark text color.
pub const NEAR_BLACK: Rgb = [17, 24, 39];

/// Parses `#rgb`, `#rrggbb`, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
///
/// Anything else (named colors, `hsl()`, garbage) is black. `rgb()`
/// components take up to three digits and are clamped to 255.
///
/// ## Example
/// ```rust
/// use atelier_core::color::parse_color_to_rgb;
///
/// assert_eq!(parse_color_to_rgb("#f0a"), [255, 0, 170]);
/// assert_eq!(parse_color_to_rgb("rgba(300, 20, 5, .5)"), [255, 20, 5]);
/// assert_eq!(parse_color_to_rgb("tomato"), [0, 0, 0]);
/// ```
pub fn parse_color_to_rgb(input: &str) -> Rgb {
    let input = input.trim();
    parse_hex(input)
        .or_else(|| parse_rgb_function(input))
        .unwrap_or([0, 0, 0])
}

fn parse_hex(input: &str) -> Option<Rgb> {
    let digits = input.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                *slot = channel(&format!("{c}{c}"))?;
            }
            Some(rgb)
        }
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => None,
    }
}

fn parse_rgb_function(input: &str) -> Option<Rgb> {
    let lower = input.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?;

    // Only the first three components matter; alpha and the closing paren
    // are not checked.
    let mut parts = args.splitn(4, ',');
    let mut rgb = [0u8; 3];
    for slot in rgb.iter_mut() {
        let part = parts.next()?.trim();
        let part = part.strip_suffix(')').unwrap_or(part).trim_end();
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse::<u16>().ok()?.min(255) as u8;
    }
    Some(rgb)
}

/// WCAG relative luminance in `0.0..=1.0`.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let linear = |v: u8| {
        let c = v as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(rgb[0]) + 0.7152 * linear(rgb[1]) + 0.0722 * linear(rgb[2])
}

/// WCAG contrast ratio in `1.0..=21.0`. Symmetric.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (l1, l2) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

/// `"#ffffff"` or `"#111827"`, whichever contrasts more with `bg`.
pub fn auto_text_color(bg: &str) -> &'static str {
    let bg = parse_color_to_rgb(bg);
    if contrast_ratio(bg, WHITE) >= contrast_ratio(bg, NEAR_BLACK) {
        "#ffffff"
    } else {
        "#111827"
    }
}
