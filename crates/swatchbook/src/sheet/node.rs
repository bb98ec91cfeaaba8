//! Scene document types and the drawing-surface boundary.
//!
//! The generator does not talk to any design tool directly; it produces a
//! [`VariantSheet`] and hands it to a [`NodeSink`]. The shipped sink
//! serializes the sheet as a JSON scene document for the design tool's
//! scripting surface to replay. What the surface does with the nodes is
//! its business.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use swatchbook_style::StyleDescriptor;

/// Errors from emitting a sheet to a sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write scene document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize scene document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What a scene node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A fully-resolved visual node carrying descriptor values.
    Frame,
    /// A cheap reference to a frame in another section.
    Instance,
}

/// One visual node in a sheet section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub id: String,
    pub name: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Resolved style values; present on frames, absent on instances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<StyleDescriptor>,
    /// Frame id an instance points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Light or dark rendering of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionMode {
    Light,
    Dark,
}

impl SectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionMode::Light => "light",
            SectionMode::Dark => "dark",
        }
    }
}

/// One light or dark section of a variant sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSection {
    pub mode: SectionMode,
    /// Section origin within the sheet.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<SceneNode>,
}

/// The full generated sheet for one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSheet {
    pub component: String,
    /// Column labels, one per cell column.
    pub columns: Vec<String>,
    /// Row labels, one per cell row.
    pub rows: Vec<String>,
    pub sections: Vec<SheetSection>,
}

/// An opaque drawing surface the generator emits sheets into.
pub trait NodeSink {
    fn emit(&mut self, sheet: &VariantSheet) -> Result<(), SinkError>;
}

/// Sink that writes one JSON scene document per component.
#[derive(Debug)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        JsonFileSink { dir: dir.into() }
    }

    /// Path the given component's scene document lands at.
    pub fn path_for(&self, component: &str) -> PathBuf {
        self.dir.join(format!("{component}.sheet.json"))
    }
}

impl NodeSink for JsonFileSink {
    fn emit(&mut self, sheet: &VariantSheet) -> Result<(), SinkError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;
        let path = self.path_for(&sheet.component);
        let json = serde_json::to_string_pretty(sheet)?;
        std::fs::write(&path, json).map_err(|source| SinkError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> VariantSheet {
        VariantSheet {
            component: "button".into(),
            columns: vec!["variant=default".into()],
            rows: vec!["size=sm".into()],
            sections: vec![SheetSection {
                mode: SectionMode::Light,
                y: 0.0,
                width: 120.0,
                height: 40.0,
                nodes: vec![SceneNode {
                    id: "light/button/size=sm,variant=default".into(),
                    name: "button / size=sm / variant=default".into(),
                    kind: NodeKind::Frame,
                    x: 0.0,
                    y: 0.0,
                    width: 120.0,
                    height: 40.0,
                    descriptor: Some(StyleDescriptor::default()),
                    reference: None,
                }],
            }],
        }
    }

    #[test]
    fn test_json_file_sink_writes_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("sheets"));
        sink.emit(&sheet()).unwrap();

        let written =
            std::fs::read_to_string(dir.path().join("sheets").join("button.sheet.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["component"], "button");
        assert_eq!(value["sections"][0]["mode"], "light");
    }

    #[test]
    fn test_instances_serialize_reference_not_descriptor() {
        let node = SceneNode {
            id: "dark/button/size=sm".into(),
            name: "button / size=sm".into(),
            kind: NodeKind::Instance,
            x: 0.0,
            y: 0.0,
            width: 120.0,
            height: 40.0,
            descriptor: None,
            reference: Some("light/button/size=sm".into()),
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "instance");
        assert_eq!(json["reference"], "light/button/size=sm");
        assert!(json.get("descriptor").is_none());
    }
}
