//! # Swatchbook Registry - Component Metadata Extraction
//!
//! `swatchbook-registry` mines component metadata out of source text and
//! aggregates it into one machine-readable registry document.
//!
//! The pipeline is: discover component source files → serve unchanged
//! components from a content-hash keyed cache → re-extract the rest with a
//! brace-balance text scanner → assemble all schemas into a
//! [`ComponentRegistry`] with derived search indexes.
//!
//! ## Core Concepts
//!
//! - [`extract`]: component source text → variant/defaults/styling tables,
//!   by pure string scanning — never parses the source as code
//! - [`RegistryCache`]: persistent JSON cache keyed by component name plus
//!   source and story content hashes; corruption is never fatal
//! - [`assemble`]: one full registry build with per-component cache reuse
//! - [`ComponentRegistry`]: the versioned document downstream tooling reads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swatchbook_registry::{assemble, AssembleOptions, RegistryCache};
//! use swatchbook_style::SemanticPalette;
//!
//! let options = AssembleOptions::new("./src/components");
//! let mut cache = RegistryCache::load("./registry-cache.json");
//! let (registry, stats) = assemble(&options, &mut cache, SemanticPalette::global())?;
//! cache.save()?;
//! std::fs::write("./registry.json", registry.to_pretty_json()?)?;
//! println!("{} hits, {} re-extracted", stats.hits, stats.misses);
//! ```

mod assemble;
mod cache;
mod error;
mod extract;
mod hash;
mod schema;

pub use assemble::{
    assemble, discover, sweep_colors, AssembleOptions, BuildStats, ComponentSource,
    SOURCE_EXTENSIONS,
};
pub use cache::{CacheEntry, RegistryCache, CACHE_VERSION};
pub use error::{RegistryError, Result};
pub use extract::{extract, ExtractedVariants, VariantValue};
pub use hash::content_hash;
pub use schema::{
    BlockSchema, ComponentKind, ComponentRegistry, ComponentSchema, PropSchema, SearchIndex,
};
