//! Variant-sheet generation.
//!
//! For a component with N variant dimensions, [`generate`] walks the full
//! cross product, resolves each combination's class string to a style
//! descriptor once, and lays the results out on a row/column grid with a
//! light section and a dark section. The dark section reuses the light
//! section's resolutions: its nodes are instances referencing the light
//! originals.

mod grid;
mod node;

pub use grid::{CellSize, Grid};
pub use node::{
    JsonFileSink, NodeKind, NodeSink, SceneNode, SectionMode, SheetSection, SinkError,
    VariantSheet,
};

use swatchbook_registry::ComponentSchema;
use swatchbook_style::{resolve, StateName, StyleDescriptor};

/// Layout knobs for sheet generation.
#[derive(Debug, Clone, Copy)]
pub struct SheetOptions {
    /// Space between grid cells.
    pub gutter: f64,
    /// Vertical gap between the light and dark sections.
    pub section_gap: f64,
    /// Cell width when the descriptor specifies none.
    pub default_width: f64,
    /// Cell height when the descriptor specifies none.
    pub default_height: f64,
}

impl Default for SheetOptions {
    fn default() -> Self {
        SheetOptions {
            gutter: 16.0,
            section_gap: 80.0,
            default_width: 120.0,
            default_height: 40.0,
        }
    }
}

struct ResolvedCell {
    label: String,
    descriptor: StyleDescriptor,
    size: CellSize,
}

/// Generates the variant sheet for one component with default options.
pub fn generate(schema: &ComponentSchema) -> VariantSheet {
    generate_with(schema, &SheetOptions::default())
}

/// Generates the variant sheet for one component.
pub fn generate_with(schema: &ComponentSchema, options: &SheetOptions) -> VariantSheet {
    // Dimensions in name order; the `variant` dimension (or the last one)
    // forms the columns, the cross product of the rest forms the rows.
    let mut dims: Vec<(String, Vec<String>)> = schema
        .props
        .iter()
        .map(|(name, prop)| (name.clone(), prop.values.clone()))
        .collect();

    let (col_name, col_values) = if dims.is_empty() {
        (String::new(), vec![String::new()])
    } else {
        let col_index = dims
            .iter()
            .position(|(name, _)| name == "variant")
            .unwrap_or(dims.len() - 1);
        dims.remove(col_index)
    };
    let row_combos = cross_product(&dims);

    let mut cells: Vec<Vec<ResolvedCell>> = Vec::with_capacity(row_combos.len());
    for row_combo in &row_combos {
        let mut row = Vec::with_capacity(col_values.len());
        for col_value in &col_values {
            let mut combo: Vec<(&str, &str)> = row_combo
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect();
            if !col_name.is_empty() {
                combo.push((col_name.as_str(), col_value.as_str()));
            }
            row.push(resolve_cell(schema, &combo, options));
        }
        cells.push(row);
    }

    let sizes: Vec<Vec<CellSize>> = cells
        .iter()
        .map(|row| row.iter().map(|cell| cell.size).collect())
        .collect();
    let grid = Grid::resolve(&sizes, col_values.len(), options.gutter);

    let columns = col_values
        .iter()
        .map(|value| dim_label(&col_name, value))
        .collect();
    let rows = row_combos.iter().map(|combo| combo_label(combo)).collect();

    let mut light_nodes = Vec::new();
    let mut dark_nodes = Vec::new();
    for (r, row) in cells.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let light_id = format!("light/{}/{}", schema.name, cell.label);
            let dark_id = format!("dark/{}/{}", schema.name, cell.label);
            let x = grid.column_x(c);
            let y = grid.row_y(r);
            let width = grid.column_widths[c];
            let height = grid.row_heights[r];
            let name = format!("{} / {}", schema.name, cell.label);

            light_nodes.push(SceneNode {
                id: light_id.clone(),
                name: name.clone(),
                kind: NodeKind::Frame,
                x,
                y,
                width,
                height,
                descriptor: Some(cell.descriptor.clone()),
                reference: None,
            });
            dark_nodes.push(SceneNode {
                id: dark_id,
                name,
                kind: NodeKind::Instance,
                x,
                y,
                width,
                height,
                descriptor: None,
                reference: Some(light_id),
            });
        }
    }

    let section_width = grid.total_width();
    let section_height = grid.total_height();
    VariantSheet {
        component: schema.name.clone(),
        columns,
        rows,
        sections: vec![
            SheetSection {
                mode: SectionMode::Light,
                y: 0.0,
                width: section_width,
                height: section_height,
                nodes: light_nodes,
            },
            SheetSection {
                mode: SectionMode::Dark,
                y: section_height + options.section_gap,
                width: section_width,
                height: section_height,
                nodes: dark_nodes,
            },
        ],
    }
}

/// Resolves one combination to a cell: class assembly, one style
/// resolution, state overrides, natural size.
fn resolve_cell(
    schema: &ComponentSchema,
    combo: &[(&str, &str)],
    options: &SheetOptions,
) -> ResolvedCell {
    let mut class_string = schema.base_styles.clone().unwrap_or_default();
    for &(dim, value) in combo {
        if let Some(classes) = schema
            .props
            .get(dim)
            .and_then(|prop| prop.classes.get(value))
        {
            class_string.push(' ');
            class_string.push_str(classes);
        }
    }

    let mut descriptor = resolve(&class_string);

    // A `state` dimension whose value names a resolved state applies that
    // state's overrides on top of the base resolution.
    for &(dim, value) in combo {
        if dim != "state" {
            continue;
        }
        if let Some(overrides) = StateName::from_prefix(value)
            .and_then(|state| descriptor.states.get(&state).cloned())
        {
            descriptor.merge(overrides);
        }
    }

    let size = CellSize {
        width: descriptor.width.unwrap_or(options.default_width),
        height: descriptor.height.unwrap_or(options.default_height),
    };
    let label = combo
        .iter()
        .map(|&(dim, value)| dim_label(dim, value))
        .collect::<Vec<_>>()
        .join(",");
    ResolvedCell {
        label: if label.is_empty() {
            "base".to_string()
        } else {
            label
        },
        descriptor,
        size,
    }
}

fn dim_label(dim: &str, value: &str) -> String {
    if dim.is_empty() {
        "base".to_string()
    } else {
        format!("{dim}={value}")
    }
}

fn combo_label(combo: &[(String, String)]) -> String {
    if combo.is_empty() {
        return "base".to_string();
    }
    combo
        .iter()
        .map(|(dim, value)| format!("{dim}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Cross product of the given dimensions; one empty combination when there
/// are none.
fn cross_product(dims: &[(String, Vec<String>)]) -> Vec<Vec<(String, String)>> {
    let mut combos: Vec<Vec<(String, String)>> = vec![Vec::new()];
    for (name, values) in dims {
        let mut next = Vec::with_capacity(combos.len() * values.len());
        for combo in &combos {
            for value in values {
                let mut extended = combo.clone();
                extended.push((name.clone(), value.clone()));
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}
