//! The semantic color table.
//!
//! Components reference colors by semantic name (`brand`, `danger`), never
//! by raw value. The table behind those names lives in a theme file loaded
//! once per process and memoized for the rest of the run; the run is
//! single-threaded and the file does not change mid-run, so the table is
//! modeled as a lazily-initialized immutable singleton.
//!
//! # Theme file format
//!
//! ```yaml
//! colors:
//!   brand:
//!     light: "#2563eb"
//!     dark: "#3b82f6"
//!   overlay: "#00000080"   # same value in both modes
//! fontSizes:
//!   xs: 12
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use thiserror::Error;

use crate::scales;

/// Default theme shipped with the crate, used when no theme file is
/// installed before first use.
const DEFAULT_THEME: &str = include_str!("../themes/default.yaml");

static GLOBAL: OnceCell<SemanticPalette> = OnceCell::new();

/// Errors raised while loading a theme file.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Theme file could not be read.
    #[error("failed to read theme file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Theme file is not valid YAML of the expected shape.
    #[error("failed to parse theme file: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A color value is not a parseable hex code.
    #[error("invalid color '{value}' for token '{name}' (expected #rgb, #rrggbb, or #rrggbbaa)")]
    InvalidColor { name: String, value: String },

    /// The global table was already initialized when install was attempted.
    #[error("semantic palette already initialized for this process")]
    AlreadyInstalled,
}

/// Result alias for theme loading.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// An RGBA color value, components in 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Parses `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Rgba { r, g, b, a: 255 })
            }
            6 | 8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = if hex.len() == 8 {
                    u8::from_str_radix(&hex[6..8], 16).ok()?
                } else {
                    255
                };
                Some(Rgba { r, g, b, a })
            }
            _ => None,
        }
    }

    /// Renders as lowercase `#rrggbb` (or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// One semantic color token: the same variable name backed by a light and a
/// dark value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorToken {
    pub light: Rgba,
    pub dark: Rgba,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawColor {
    Single(String),
    Modes { light: String, dark: String },
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
    #[serde(default)]
    colors: BTreeMap<String, RawColor>,
    #[serde(default, rename = "fontSizes")]
    font_sizes: BTreeMap<String, f64>,
}

/// The semantic name → color token table, plus theme-overridable scales.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticPalette {
    colors: BTreeMap<String, ColorToken>,
    font_sizes: BTreeMap<String, f64>,
}

impl SemanticPalette {
    /// Parses a palette from theme YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: ThemeFile = serde_yaml::from_str(yaml)?;
        let mut colors = BTreeMap::new();
        for (name, value) in raw.colors {
            let token = match &value {
                RawColor::Single(hex) => {
                    let rgba = Rgba::parse_hex(hex).ok_or_else(|| ThemeError::InvalidColor {
                        name: name.clone(),
                        value: hex.clone(),
                    })?;
                    ColorToken {
                        light: rgba,
                        dark: rgba,
                    }
                }
                RawColor::Modes { light, dark } => {
                    let parse = |hex: &str| {
                        Rgba::parse_hex(hex).ok_or_else(|| ThemeError::InvalidColor {
                            name: name.clone(),
                            value: hex.to_string(),
                        })
                    };
                    ColorToken {
                        light: parse(light)?,
                        dark: parse(dark)?,
                    }
                }
            };
            colors.insert(name, token);
        }
        Ok(SemanticPalette {
            colors,
            font_sizes: raw.font_sizes,
        })
    }

    /// Loads a palette from a theme file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// The palette embedded in the crate.
    pub fn embedded_default() -> Self {
        Self::from_yaml(DEFAULT_THEME).expect("embedded default theme is valid")
    }

    /// The process-wide palette, initialized from the embedded default
    /// theme on first use. Never invalidated within a run.
    pub fn global() -> &'static SemanticPalette {
        GLOBAL.get_or_init(Self::embedded_default)
    }

    /// Installs a theme file as the process-wide palette.
    ///
    /// Must be called before the first [`global`](Self::global) lookup;
    /// afterwards the table is immutable for the remainder of the run.
    pub fn install_from_file<P: AsRef<Path>>(path: P) -> Result<()> {
        let palette = Self::from_file(path)?;
        GLOBAL
            .set(palette)
            .map_err(|_| ThemeError::AlreadyInstalled)
    }

    /// Returns true if `name` is a known semantic color.
    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    /// Looks up the variable name a semantic color binds to.
    ///
    /// Variable names are the semantic names themselves; opacity-suffixed
    /// forms (`brand/50`) are appended by the resolver, not stored here.
    pub fn variable_for<'a>(&'a self, name: &str) -> Option<&'a str> {
        self.colors.get_key_value(name).map(|(k, _)| k.as_str())
    }

    /// Looks up the light/dark values behind a semantic color.
    pub fn color(&self, name: &str) -> Option<&ColorToken> {
        self.colors.get(name)
    }

    /// Resolves a font-size name, theme overrides first, then the built-in
    /// scale.
    pub fn font_size(&self, name: &str) -> Option<f64> {
        self.font_sizes
            .get(name)
            .copied()
            .or_else(|| scales::default_font_size(name))
    }

    /// Returns true if `name` is a font-size name (theme or built-in).
    pub fn has_font_size(&self, name: &str) -> bool {
        self.font_sizes.contains_key(name) || scales::default_font_size(name).is_some()
    }

    /// Iterates semantic color names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(|k| k.as_str())
    }

    /// Number of semantic colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette defines no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(
            Rgba::parse_hex("#fff"),
            Some(Rgba {
                r: 255,
                g: 255,
                b: 255,
                a: 255
            })
        );
        assert_eq!(
            Rgba::parse_hex("#2563eb"),
            Some(Rgba {
                r: 37,
                g: 99,
                b: 235,
                a: 255
            })
        );
        assert_eq!(
            Rgba::parse_hex("#00000080"),
            Some(Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 128
            })
        );
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(Rgba::parse_hex("2563eb"), None);
        assert_eq!(Rgba::parse_hex("#ff"), None);
        assert_eq!(Rgba::parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_hex_round_trip() {
        let color = Rgba::parse_hex("#2563eb").unwrap();
        assert_eq!(color.to_hex(), "#2563eb");
        let translucent = Rgba::parse_hex("#00000080").unwrap();
        assert_eq!(translucent.to_hex(), "#00000080");
    }

    #[test]
    fn test_from_yaml_modes_and_single() {
        let palette = SemanticPalette::from_yaml(
            r##"
            colors:
              brand:
                light: "#2563eb"
                dark: "#3b82f6"
              overlay: "#00000080"
            "##,
        )
        .unwrap();

        assert!(palette.contains("brand"));
        assert!(palette.contains("overlay"));
        let brand = palette.color("brand").unwrap();
        assert_ne!(brand.light, brand.dark);
        let overlay = palette.color("overlay").unwrap();
        assert_eq!(overlay.light, overlay.dark);
    }

    #[test]
    fn test_from_yaml_invalid_color() {
        let result = SemanticPalette::from_yaml(
            r#"
            colors:
              bad: "notacolor"
            "#,
        );
        assert!(matches!(result, Err(ThemeError::InvalidColor { .. })));
    }

    #[test]
    fn test_font_size_theme_overrides_builtin() {
        let palette = SemanticPalette::from_yaml(
            r#"
            fontSizes:
              xs: 11
            "#,
        )
        .unwrap();

        assert_eq!(palette.font_size("xs"), Some(11.0));
        // Unlisted names fall back to the built-in scale.
        assert_eq!(palette.font_size("base"), Some(16.0));
        assert_eq!(palette.font_size("giant"), None);
    }

    #[test]
    fn test_embedded_default_parses() {
        let palette = SemanticPalette::embedded_default();
        assert!(palette.contains("brand"));
        assert!(palette.contains("danger"));
        assert!(palette.contains("primary"));
        assert!(!palette.is_empty());
    }

    #[test]
    fn test_variable_for() {
        let palette = SemanticPalette::embedded_default();
        assert_eq!(palette.variable_for("brand"), Some("brand"));
        assert_eq!(palette.variable_for("nope"), None);
    }

    #[test]
    fn test_from_file() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("theme.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "colors:\n  ink: \"#111111\"\n").unwrap();

        let palette = SemanticPalette::from_file(&path).unwrap();
        assert!(palette.contains("ink"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = SemanticPalette::from_file("/nonexistent/theme.yaml");
        assert!(matches!(result, Err(ThemeError::Read { .. })));
    }
}
