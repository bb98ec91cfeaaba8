//! Utility-class string → [`StyleDescriptor`] resolution.
//!
//! The input is a space-separated string of short tokens (`px-2`,
//! `hover:bg-brand`, `w-[32rem]`). Resolution is deterministic, total, and
//! permissive: unknown or malformed tokens never raise errors, they are
//! dropped silently. The token vocabulary is expected to grow faster than
//! this resolver, so anything unrecognized is someone else's business.
//!
//! Tokens are classified in order against a fixed rule table. Scalar
//! properties follow last-token-wins; color and border sub-fields compose
//! across tokens. State-prefixed tokens (`hover:…`) classify their suffix
//! recursively and merge the result into the matching state bucket.

use crate::descriptor::{BorderStyle, StateName, StyleDescriptor};
use crate::palette::SemanticPalette;
use crate::scales;

/// Resolves a utility-class string against the process-wide semantic
/// palette.
pub fn resolve(class_string: &str) -> StyleDescriptor {
    resolve_with(SemanticPalette::global(), class_string)
}

/// Resolves a utility-class string against an explicit palette.
pub fn resolve_with(palette: &SemanticPalette, class_string: &str) -> StyleDescriptor {
    let mut out = StyleDescriptor::default();
    for token in class_string.split_ascii_whitespace() {
        out.merge(classify(palette, token));
    }
    out
}

/// Splits a class string into the fragments scoped to each state, plus the
/// stateless remainder.
///
/// This is the same prefix recognition the resolver uses, exposed for
/// callers that need the raw fragments (documentation side tables) rather
/// than the numeric IR. Tokens with unknown prefixes are dropped, matching
/// the resolver's behavior.
pub fn split_states(class_string: &str) -> (String, Vec<(StateName, String)>) {
    let mut plain: Vec<&str> = Vec::new();
    let mut buckets: Vec<(StateName, Vec<&str>)> = Vec::new();

    for token in class_string.split_ascii_whitespace() {
        let stripped = token.strip_prefix('!').unwrap_or(token);
        match stripped.split_once(':') {
            None => plain.push(token),
            Some((prefix, rest)) => {
                let Some(state) = StateName::from_prefix(prefix) else {
                    continue;
                };
                if rest.is_empty() {
                    continue;
                }
                match buckets.iter_mut().find(|(s, _)| *s == state) {
                    Some((_, fragments)) => fragments.push(rest),
                    None => buckets.push((state, vec![rest])),
                }
            }
        }
    }

    (
        plain.join(" "),
        buckets
            .into_iter()
            .map(|(state, fragments)| (state, fragments.join(" ")))
            .collect(),
    )
}

/// Classifies a single token into a partial descriptor.
fn classify(palette: &SemanticPalette, token: &str) -> StyleDescriptor {
    // The important marker changes CSS specificity, not meaning.
    let token = token.strip_prefix('!').unwrap_or(token);

    if let Some((prefix, rest)) = token.split_once(':') {
        let Some(state) = StateName::from_prefix(prefix) else {
            // Unknown variant prefix: drop the token, suffix included.
            return StyleDescriptor::default();
        };
        if rest.is_empty() {
            return StyleDescriptor::default();
        }
        let inner = classify(palette, rest);
        if inner.is_empty() {
            return StyleDescriptor::default();
        }
        let mut out = StyleDescriptor::default();
        out.states.insert(state, inner);
        return out;
    }

    classify_plain(palette, token)
}

fn classify_plain(palette: &SemanticPalette, token: &str) -> StyleDescriptor {
    let mut d = StyleDescriptor::default();

    // Min/max sizing accepts bracketed arbitrary values only.
    if let Some(rest) = token.strip_prefix("min-w-") {
        d.min_width = parse_bracket(rest);
        return d;
    }
    if let Some(rest) = token.strip_prefix("min-h-") {
        d.min_height = parse_bracket(rest);
        return d;
    }
    if let Some(rest) = token.strip_prefix("max-w-") {
        d.max_width = parse_bracket(rest);
        return d;
    }
    if let Some(rest) = token.strip_prefix("max-h-") {
        d.max_height = parse_bracket(rest);
        return d;
    }

    if let Some(rest) = token.strip_prefix("size-") {
        if let Some(px) = scales::spacing(rest) {
            d.width = Some(px);
            d.height = Some(px);
        }
        return d;
    }
    if let Some(rest) = token.strip_prefix("w-") {
        d.width = if rest.starts_with('[') {
            parse_bracket(rest)
        } else {
            scales::spacing(rest)
        };
        return d;
    }
    if let Some(rest) = token.strip_prefix("h-") {
        d.height = if rest.starts_with('[') {
            parse_bracket(rest)
        } else {
            scales::spacing(rest)
        };
        return d;
    }
    if let Some(rest) = token.strip_prefix("px-") {
        d.padding_x = scales::spacing(rest);
        return d;
    }
    if let Some(rest) = token.strip_prefix("py-") {
        d.padding_y = scales::spacing(rest);
        return d;
    }
    if let Some(rest) = token.strip_prefix("gap-") {
        d.gap = scales::spacing(rest);
        return d;
    }

    if token == "rounded" {
        d.border_radius = Some(scales::DEFAULT_RADIUS);
        return d;
    }
    if let Some(rest) = token.strip_prefix("rounded-") {
        d.border_radius = scales::radius(rest);
        return d;
    }

    if token == "text-white" {
        // Literal white has no semantic backing token.
        d.text_variable = Some(None);
        d.is_white_text = true;
        return d;
    }
    if let Some(rest) = token.strip_prefix("text-") {
        if rest == "transparent" || rest == "inherit" {
            d.text_variable = Some(None);
        } else if palette.has_font_size(rest) {
            d.font_size = palette.font_size(rest);
        } else if let Some((variable, opacity)) = semantic_color(palette, rest) {
            d.text_variable = Some(Some(variable));
            d.text_opacity = opacity;
        }
        return d;
    }

    if let Some(rest) = token.strip_prefix("font-") {
        d.font_weight = scales::font_weight(rest);
        return d;
    }

    if let Some(rest) = token.strip_prefix("bg-") {
        if rest == "transparent" || rest == "inherit" {
            // Explicit "no fill", distinguished from unspecified.
            d.fill_variable = Some(None);
        } else if let Some((variable, opacity)) = semantic_color(palette, rest) {
            d.fill_variable = Some(Some(variable));
            d.fill_opacity = opacity;
        }
        return d;
    }

    if token == "border" {
        d.has_border = true;
        d.stroke_weight = Some(1.0);
        return d;
    }
    if token == "ring" {
        d.has_border = true;
        return d;
    }
    if let Some(rest) = token.strip_prefix("border-") {
        match rest {
            "none" => {
                // hasBorder without a weight; consumers treat the pair as
                // "no visible border".
                d.has_border = true;
            }
            "dashed" => {
                d.border_style = Some(BorderStyle::Dashed);
                d.dash_pattern = Some([4.0, 4.0]);
            }
            "transparent" | "inherit" => {
                d.stroke_variable = Some(None);
            }
            _ => {
                if let Ok(weight) = rest.parse::<f64>() {
                    d.stroke_weight = Some(weight);
                } else if let Some((variable, opacity)) = semantic_color(palette, rest) {
                    d.stroke_variable = Some(Some(variable));
                    d.stroke_opacity = opacity;
                }
            }
        }
        return d;
    }
    if let Some(rest) = token.strip_prefix("ring-") {
        if rest == "transparent" || rest == "inherit" {
            d.stroke_variable = Some(None);
        } else if let Ok(weight) = rest.parse::<f64>() {
            d.stroke_weight = Some(weight);
        } else if let Some((variable, opacity)) = semantic_color(palette, rest) {
            d.stroke_variable = Some(Some(variable));
            d.stroke_opacity = opacity;
        }
        return d;
    }

    // Layout, flex, z-index, and everything else: recognized or not,
    // nothing to extract.
    d
}

/// Resolves a color suffix (`brand`, `brand/50`) to a variable name and
/// optional opacity.
///
/// The `/NN` form appends the suffix to the variable name so downstream
/// consumers can bind the opacity-qualified form distinctly. Opacity is
/// `NN / 100` with no upper cap.
fn semantic_color(palette: &SemanticPalette, value: &str) -> Option<(String, Option<f64>)> {
    match value.split_once('/') {
        None => palette
            .variable_for(value)
            .map(|variable| (variable.to_string(), None)),
        Some((base, pct)) => {
            let variable = palette.variable_for(base)?;
            let pct: u32 = pct.parse().ok()?;
            Some((format!("{variable}/{pct}"), Some(f64::from(pct) / 100.0)))
        }
    }
}

/// Parses a bracketed arbitrary value (`[100px]`, `[32rem]`, `[14]`) to
/// pixels. Malformed brackets resolve to nothing.
fn parse_bracket(value: &str) -> Option<f64> {
    let inner = value.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    // rem before em: "2rem" must not lose its 'r' to the em check.
    let (number, multiplier) = if let Some(n) = inner.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = inner.strip_suffix("rem") {
        (n, 16.0)
    } else if let Some(n) = inner.strip_suffix("em") {
        (n, 16.0)
    } else {
        (inner, 1.0)
    };
    number.parse::<f64>().ok().map(|v| v * multiplier)
}
