//! Registry document types.
//!
//! The registry is the single machine-readable artifact downstream tooling
//! consumes: one [`ComponentSchema`] per component, a blocks subset, and
//! derived search indexes. Every map is a `BTreeMap` so that repeated runs
//! over unchanged inputs serialize byte-identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether an entry is a plain component or an installable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Component,
    Block,
}

impl ComponentKind {
    /// Lowercase form, as used in the `byType` index.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Component => "component",
            ComponentKind::Block => "block",
        }
    }
}

/// One configurable prop derived from a variant dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSchema {
    /// Prop type; variant dimensions are always `"enum"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// True when the dimension has no default value.
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Allowed values, sorted.
    pub values: Vec<String>,
    /// Per-value documentation text.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub descriptions: BTreeMap<String, String>,
    /// Per-value raw utility-class strings.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub classes: BTreeMap<String, String>,
    /// Per-value state-scoped class fragments (value → state → classes).
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub state_classes: BTreeMap<String, BTreeMap<String, String>>,
}

/// Registry entry for one UI component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub import_path: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub props: BTreeMap<String, PropSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
    /// Semantic color tokens referenced anywhere in the component source.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub colors: Vec<String>,
    /// Raw base style string applied to every variant.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_styles: Option<String>,
    /// Free-form styling metadata, carried verbatim from the source.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub styling: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sub_components: Vec<String>,
}

/// Install metadata for a block (a composed, copy-in unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSchema {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub import_path: String,
    /// Components the block is composed of.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub components: Vec<String>,
}

/// Derived lookup indexes, computed once at assembly time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndex {
    pub by_category: BTreeMap<String, Vec<String>>,
    pub by_name: Vec<String>,
    pub by_type: BTreeMap<String, Vec<String>>,
}

/// The top-level registry document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRegistry {
    pub version: String,
    pub components: BTreeMap<String, ComponentSchema>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub blocks: BTreeMap<String, BlockSchema>,
    pub search: SearchIndex,
}

impl ComponentRegistry {
    /// Serializes the registry as stable, pretty-printed JSON.
    ///
    /// All maps are ordered, so unchanged inputs produce byte-identical
    /// output across runs.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
