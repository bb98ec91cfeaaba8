//! # Swatchbook - Design-System Registry and Variant Sheets
//!
//! `swatchbook` turns a component library's utility-class styling into two
//! derived artifacts:
//!
//! - a machine-readable **component registry** describing every
//!   component's props, variants, and styling metadata (built by
//!   [`swatchbook_registry`])
//! - **design-tool variant sheets**: one visual node per point in the
//!   cross product of a component's variant dimensions, laid out on a
//!   row/column grid with light and dark sections ([`sheet`])
//!
//! It also syncs the semantic color palette to a design tool's variables
//! API ([`remote`], [`tokens`]) with purge-then-recreate semantics.
//!
//! The pipeline is single-threaded and synchronous end to end: one process
//! reads the component sources, resolves styles, assembles the registry,
//! writes the cache, and (in a separate invocation) drives the sheet
//! generator or the token sync. Each invocation is idempotent to re-run.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swatchbook::sheet::{generate, JsonFileSink, NodeSink};
//! use swatchbook_registry::{assemble, AssembleOptions, RegistryCache};
//! use swatchbook_style::SemanticPalette;
//!
//! let mut cache = RegistryCache::load("registry-cache.json");
//! let (registry, _) = assemble(
//!     &AssembleOptions::new("src/components"),
//!     &mut cache,
//!     SemanticPalette::global(),
//! )?;
//!
//! let mut sink = JsonFileSink::new("sheets");
//! for schema in registry.components.values() {
//!     sink.emit(&generate(schema))?;
//! }
//! ```

pub mod remote;
pub mod sheet;
pub mod tokens;

pub use remote::{DesignToolClient, RemoteError, RemoteVariablesDoc, VariablesPayload};
pub use sheet::{generate, generate_with, JsonFileSink, NodeSink, SheetOptions, VariantSheet};
pub use tokens::{build_sync_payload, rename_map, COLLECTION_NAME};
