//! Numeric lookup tables for the fixed token vocabulary.
//!
//! Spacing values resolve through a lookup table first; numeric values
//! outside the table fall back to `value * 4` pixels, the scale's base
//! unit assumption. Radius and font-weight names are closed tables.

/// Spacing scale entries, in pixels.
///
/// Includes the non-numeric `px` entry. Numeric keys are listed explicitly
/// so named lookups stay cheap and the table documents the vocabulary, even
/// though every numeric entry agrees with the `value * 4` fallback.
const SPACING: &[(&str, f64)] = &[
    ("px", 1.0),
    ("0", 0.0),
    ("0.5", 2.0),
    ("1", 4.0),
    ("1.5", 6.0),
    ("2", 8.0),
    ("2.5", 10.0),
    ("3", 12.0),
    ("3.5", 14.0),
    ("4", 16.0),
    ("5", 20.0),
    ("6", 24.0),
    ("7", 28.0),
    ("8", 32.0),
    ("9", 36.0),
    ("10", 40.0),
    ("11", 44.0),
    ("12", 48.0),
    ("14", 56.0),
    ("16", 64.0),
    ("20", 80.0),
    ("24", 96.0),
    ("28", 112.0),
    ("32", 128.0),
    ("36", 144.0),
    ("40", 160.0),
    ("48", 192.0),
    ("56", 224.0),
    ("64", 256.0),
    ("72", 288.0),
    ("80", 320.0),
    ("96", 384.0),
];

/// Resolves a spacing token value to pixels.
///
/// Unlisted numeric values fall back to `value * 4`. Non-numeric values
/// outside the table (`full`, `auto`) resolve to nothing.
pub fn spacing(value: &str) -> Option<f64> {
    if let Some((_, px)) = SPACING.iter().find(|(name, _)| *name == value) {
        return Some(*px);
    }
    value.parse::<f64>().ok().map(|v| v * 4.0)
}

/// Named border-radius scale, in pixels.
const RADII: &[(&str, f64)] = &[
    ("none", 0.0),
    ("sm", 4.0),
    ("md", 6.0),
    ("lg", 8.0),
    ("xl", 12.0),
    ("2xl", 16.0),
    ("3xl", 24.0),
    ("full", 9999.0),
];

/// Radius a bare `rounded` token resolves to (the `sm` entry).
pub const DEFAULT_RADIUS: f64 = 4.0;

/// Resolves a named radius token suffix to pixels.
pub fn radius(name: &str) -> Option<f64> {
    RADII
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, px)| *px)
}

/// Named font weights.
const FONT_WEIGHTS: &[(&str, u32)] = &[
    ("thin", 100),
    ("extralight", 200),
    ("light", 300),
    ("normal", 400),
    ("medium", 500),
    ("semibold", 600),
    ("bold", 700),
    ("extrabold", 800),
    ("black", 900),
];

/// Resolves a `font-{name}` weight token suffix.
pub fn font_weight(name: &str) -> Option<u32> {
    FONT_WEIGHTS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, w)| *w)
}

/// Built-in font-size scale, in pixels. Theme files can override any entry.
pub const DEFAULT_FONT_SIZES: &[(&str, f64)] = &[
    ("xs", 12.0),
    ("sm", 14.0),
    ("base", 16.0),
    ("lg", 18.0),
    ("xl", 20.0),
    ("2xl", 24.0),
    ("3xl", 30.0),
    ("4xl", 36.0),
];

/// Resolves a font-size name against the built-in scale.
pub fn default_font_size(name: &str) -> Option<f64> {
    DEFAULT_FONT_SIZES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, px)| *px)
}
