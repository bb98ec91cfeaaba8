//! The structured style descriptor produced by the resolver.
//!
//! A [`StyleDescriptor`] is the typed result of resolving one utility-class
//! string. Every field is optional: absence means "not specified", which is
//! distinct from any concrete value (including zero). The fill, text, and
//! stroke variables use `Option<Option<String>>` so that an explicit
//! "no fill" (`bg-transparent`) is representable as a present `null`, apart
//! from plain absence.

use std::collections::BTreeMap;

use serde::Serialize;

/// Interactive or data-driven states a token can be scoped to.
///
/// These are the colon-delimited prefixes recognized by the resolver
/// (`hover:bg-brand`). Unknown prefixes are not represented here; tokens
/// carrying them are dropped during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateName {
    Hover,
    Focus,
    Active,
    Disabled,
    NotDisabled,
    DataState,
    DataPressed,
}

impl StateName {
    /// All recognized states, in declaration order.
    pub const ALL: [StateName; 7] = [
        StateName::Hover,
        StateName::Focus,
        StateName::Active,
        StateName::Disabled,
        StateName::NotDisabled,
        StateName::DataState,
        StateName::DataPressed,
    ];

    /// Parses a colon-prefix into a state name.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "hover" => Some(StateName::Hover),
            "focus" => Some(StateName::Focus),
            "active" => Some(StateName::Active),
            "disabled" => Some(StateName::Disabled),
            "not-disabled" => Some(StateName::NotDisabled),
            "data-state" => Some(StateName::DataState),
            "data-pressed" => Some(StateName::DataPressed),
            _ => None,
        }
    }

    /// The prefix form of this state name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateName::Hover => "hover",
            StateName::Focus => "focus",
            StateName::Active => "active",
            StateName::Disabled => "disabled",
            StateName::NotDisabled => "not-disabled",
            StateName::DataState => "data-state",
            StateName::DataPressed => "data-pressed",
        }
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Dashed,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Structured result of resolving one utility-class string.
///
/// Scalar layout properties follow last-token-wins: when two tokens in the
/// same string specify the same property, the later one overrides. Color and
/// border properties compose across independent sub-fields instead, because
/// different tokens set different sub-fields (fill vs. stroke vs. opacity).
/// [`merge`](StyleDescriptor::merge) implements exactly that asymmetry.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,

    /// Fill variable name. `Some(None)` is an explicit transparent fill,
    /// distinct from an unspecified fill (`None`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_variable: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,

    /// Text color variable name; `Some(None)` for the literal-white special
    /// case, which has no semantic backing token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_variable: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_opacity: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_white_text: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub has_border: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_variable: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_pattern: Option<[f64; 2]>,

    /// Per-state overrides, each containing only the properties that
    /// state's tokens specify.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<StateName, StyleDescriptor>,
}

macro_rules! overwrite_if_set {
    ($self:ident, $other:ident, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $self.$field = $other.$field;
            }
        )+
    };
}

impl StyleDescriptor {
    /// Returns true if no property is specified.
    pub fn is_empty(&self) -> bool {
        *self == StyleDescriptor::default()
    }

    /// Merges `other` into `self`, with `other` winning on every property
    /// it specifies.
    ///
    /// Unspecified properties in `other` leave `self` untouched, which is
    /// what makes independent color sub-fields compose while repeated
    /// scalar tokens overwrite. The text family is merged atomically: a
    /// token that sets `text_variable` also decides `is_white_text`, so a
    /// later semantic text color clears an earlier literal-white flag.
    pub fn merge(&mut self, other: StyleDescriptor) {
        overwrite_if_set!(
            self, other, width, height, min_width, min_height, max_width, max_height, padding_x,
            padding_y, gap, border_radius, font_size, font_weight, fill_variable, fill_opacity,
            stroke_weight, stroke_variable, stroke_opacity, border_style, dash_pattern,
        );

        if other.text_variable.is_some() {
            self.text_variable = other.text_variable;
            self.is_white_text = other.is_white_text;
        } else if other.is_white_text {
            self.is_white_text = true;
        }
        if other.text_opacity.is_some() {
            self.text_opacity = other.text_opacity;
        }

        if other.has_border {
            self.has_border = true;
        }

        for (state, descriptor) in other.states {
            self.states.entry(state).or_default().merge(descriptor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(StyleDescriptor::default().is_empty());
    }

    #[test]
    fn test_merge_overwrites_scalars() {
        let mut base = StyleDescriptor {
            height: Some(36.0),
            ..Default::default()
        };
        base.merge(StyleDescriptor {
            height: Some(100.0),
            ..Default::default()
        });
        assert_eq!(base.height, Some(100.0));
    }

    #[test]
    fn test_merge_keeps_unspecified_fields() {
        let mut base = StyleDescriptor {
            width: Some(64.0),
            fill_variable: Some(Some("brand".into())),
            ..Default::default()
        };
        base.merge(StyleDescriptor {
            stroke_variable: Some(Some("border".into())),
            ..Default::default()
        });
        assert_eq!(base.width, Some(64.0));
        assert_eq!(base.fill_variable, Some(Some("brand".into())));
        assert_eq!(base.stroke_variable, Some(Some("border".into())));
    }

    #[test]
    fn test_merge_semantic_text_clears_white_flag() {
        let mut base = StyleDescriptor {
            text_variable: Some(None),
            is_white_text: true,
            ..Default::default()
        };
        base.merge(StyleDescriptor {
            text_variable: Some(Some("brand".into())),
            ..Default::default()
        });
        assert_eq!(base.text_variable, Some(Some("brand".into())));
        assert!(!base.is_white_text);
    }

    #[test]
    fn test_merge_states_accumulate() {
        let mut base = StyleDescriptor::default();
        base.states.insert(
            StateName::Hover,
            StyleDescriptor {
                fill_variable: Some(Some("brand".into())),
                ..Default::default()
            },
        );

        let mut incoming = StyleDescriptor::default();
        incoming.states.insert(
            StateName::Hover,
            StyleDescriptor {
                text_variable: Some(None),
                is_white_text: true,
                ..Default::default()
            },
        );
        base.merge(incoming);

        let hover = &base.states[&StateName::Hover];
        assert_eq!(hover.fill_variable, Some(Some("brand".into())));
        assert_eq!(hover.text_variable, Some(None));
        assert!(hover.is_white_text);
    }

    #[test]
    fn test_state_prefix_round_trip() {
        for state in StateName::ALL {
            assert_eq!(StateName::from_prefix(state.as_str()), Some(state));
        }
        assert_eq!(StateName::from_prefix("group-hover"), None);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let descriptor = StyleDescriptor {
            fill_variable: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json, serde_json::json!({ "fillVariable": null }));
    }
}
