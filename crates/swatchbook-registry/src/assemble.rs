//! Registry assembly: discovery, cache-or-extract, schema building.
//!
//! One assembly run reads every component source file, serves unchanged
//! components from the cache, re-extracts the rest, and aggregates the
//! results into a single [`ComponentRegistry`] with derived search indexes.
//! The registry is rebuilt in full every run; only extraction is
//! incremental.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use swatchbook_style::SemanticPalette;

use crate::cache::{CacheEntry, RegistryCache};
use crate::error::{RegistryError, Result};
use crate::extract::{extract, ExtractedVariants};
use crate::hash::content_hash;
use crate::schema::{
    BlockSchema, ComponentKind, ComponentRegistry, ComponentSchema, PropSchema, SearchIndex,
};

/// Source file extensions treated as component implementations.
pub const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js", "svelte", "vue"];

/// Options for one assembly run.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Directory scanned for component source files.
    pub components_dir: PathBuf,
    /// Prefix prepended to component names for `importPath`.
    pub import_prefix: String,
}

impl AssembleOptions {
    pub fn new<P: Into<PathBuf>>(components_dir: P) -> Self {
        AssembleOptions {
            components_dir: components_dir.into(),
            import_prefix: "@/components/ui".to_string(),
        }
    }
}

/// Counters for one assembly run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Components served from the cache.
    pub hits: usize,
    /// Components re-extracted.
    pub misses: usize,
    /// Components dropped (unreadable file or missing variant tables).
    pub skipped: usize,
}

/// One discovered component: its source file and optional story file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSource {
    pub name: String,
    pub source_path: PathBuf,
    pub story_path: Option<PathBuf>,
}

/// Scans the components directory for source files.
///
/// The file stem is the component name; a sibling `<name>.stories.<ext>`
/// file, when present, is the component's story file. Results are sorted
/// by name so runs are deterministic regardless of directory order.
pub fn discover(dir: &Path) -> Result<Vec<ComponentSource>> {
    if !dir.is_dir() {
        return Err(RegistryError::MissingDir {
            path: dir.display().to_string(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|source| RegistryError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| RegistryError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if file_name.contains(".stories.") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let story_path = SOURCE_EXTENSIONS
            .iter()
            .map(|story_ext| dir.join(format!("{name}.stories.{story_ext}")))
            .find(|candidate| candidate.is_file());

        sources.push(ComponentSource {
            name: name.to_string(),
            source_path: path,
            story_path,
        });
    }
    sources.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(sources)
}

/// Runs a full assembly: discover → cache-or-extract → aggregate.
///
/// Per-component failures skip the component and never fail the run; the
/// only hard errors are a missing components directory and unreadable
/// directory listings.
pub fn assemble(
    options: &AssembleOptions,
    cache: &mut RegistryCache,
    palette: &SemanticPalette,
) -> Result<(ComponentRegistry, BuildStats)> {
    let sources = discover(&options.components_dir)?;
    let mut components = BTreeMap::new();
    let mut stats = BuildStats::default();

    for source in &sources {
        let text = match std::fs::read_to_string(&source.source_path) {
            Ok(text) => text,
            Err(error) => {
                warn!(component = %source.name, %error, "unreadable source file, skipping");
                stats.skipped += 1;
                continue;
            }
        };
        let story_text = source
            .story_path
            .as_ref()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .unwrap_or_default();
        let source_hash = content_hash(&text);
        let story_hash = content_hash(&story_text);

        if let Some(schema) = cache.get(&source.name, &source_hash, &story_hash) {
            debug!(component = %source.name, "cache hit");
            components.insert(source.name.clone(), schema.clone());
            stats.hits += 1;
            continue;
        }

        let Some(extracted) = extract(&text) else {
            warn!(component = %source.name, "variant tables not found, skipping");
            stats.skipped += 1;
            continue;
        };
        debug!(component = %source.name, "re-extracted");
        stats.misses += 1;

        let schema = build_schema(source, extracted, &text, palette, options);
        cache.put(CacheEntry::new(
            source.name.clone(),
            source_hash,
            story_hash,
            schema.clone(),
        ));
        components.insert(source.name.clone(), schema);
    }

    let blocks = build_blocks(&components);
    let search = build_search(&components);
    let registry = ComponentRegistry {
        version: env!("CARGO_PKG_VERSION").to_string(),
        components,
        blocks,
        search,
    };
    Ok((registry, stats))
}

fn build_schema(
    source: &ComponentSource,
    extracted: ExtractedVariants,
    text: &str,
    palette: &SemanticPalette,
    options: &AssembleOptions,
) -> ComponentSchema {
    let styling = &extracted.styling;
    let styling_str = |key: &str| {
        styling
            .as_ref()
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    };
    let styling_list = |key: &str| -> Vec<String> {
        styling
            .as_ref()
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };

    let kind = if styling_str("type").as_deref() == Some("block") {
        ComponentKind::Block
    } else {
        ComponentKind::Component
    };
    let description = styling_str("description");
    let category = styling_str("category");
    let examples = styling_list("examples");
    let sub_components = styling_list("subComponents");

    let mut props = BTreeMap::new();
    for (dimension, values) in &extracted.variants {
        let default = extracted.defaults.get(dimension).cloned();
        let descriptions = values
            .iter()
            .filter_map(|(value, v)| {
                v.description
                    .as_ref()
                    .map(|d| (value.clone(), d.clone()))
            })
            .collect();
        let classes = values
            .iter()
            .map(|(value, v)| (value.clone(), v.classes.clone()))
            .collect();
        let state_classes = values
            .iter()
            .filter(|(_, v)| !v.state_classes.is_empty())
            .map(|(value, v)| (value.clone(), v.state_classes.clone()))
            .collect();
        props.insert(
            dimension.clone(),
            PropSchema {
                kind: "enum".to_string(),
                required: default.is_none(),
                default,
                description: None,
                values: values.keys().cloned().collect(),
                descriptions,
                classes,
                state_classes,
            },
        );
    }

    ComponentSchema {
        name: source.name.clone(),
        kind,
        description,
        import_path: format!("{}/{}", options.import_prefix, source.name),
        category,
        props,
        examples,
        colors: sweep_colors(text, palette),
        base_styles: extracted.base,
        styling: extracted.styling,
        sub_components,
    }
}

/// Scans full source text for semantic color references.
///
/// This sweep is broader than the variant extractor: any
/// `{prefix}-{semantic}` token anywhere in the file counts, whether or not
/// it sits inside a variant table. State prefixes and opacity suffixes are
/// peeled off before the palette lookup.
pub fn sweep_colors(text: &str, palette: &SemanticPalette) -> Vec<String> {
    const COLOR_PREFIXES: &[&str] = &["bg-", "text-", "border-", "ring-"];

    let mut found = BTreeSet::new();
    let words = text.split(|c: char| {
        !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | ':' | '!'))
    });
    for word in words {
        for segment in word.split(':') {
            let segment = segment.trim_start_matches('!');
            for prefix in COLOR_PREFIXES {
                let Some(rest) = segment.strip_prefix(prefix) else {
                    continue;
                };
                let base = rest.split('/').next().unwrap_or(rest);
                if palette.contains(base) {
                    found.insert(base.to_string());
                }
            }
        }
    }
    found.into_iter().collect()
}

fn build_blocks(components: &BTreeMap<String, ComponentSchema>) -> BTreeMap<String, BlockSchema> {
    components
        .values()
        .filter(|schema| schema.kind == ComponentKind::Block)
        .map(|schema| {
            (
                schema.name.clone(),
                BlockSchema {
                    name: schema.name.clone(),
                    description: schema.description.clone(),
                    import_path: schema.import_path.clone(),
                    components: schema.sub_components.clone(),
                },
            )
        })
        .collect()
}

fn build_search(components: &BTreeMap<String, ComponentSchema>) -> SearchIndex {
    let by_name = components.keys().cloned().collect();
    let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, schema) in components {
        if let Some(category) = &schema.category {
            by_category
                .entry(category.clone())
                .or_default()
                .push(name.clone());
        }
        by_type
            .entry(schema.kind.as_str().to_string())
            .or_default()
            .push(name.clone());
    }
    SearchIndex {
        by_category,
        by_name,
        by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_colors_finds_tokens_anywhere() {
        let palette = SemanticPalette::global();
        let text = r#"
            const cls = "bg-primary text-primary-foreground"
            // also hover:bg-danger/40 and ring-ring outside any table
            el.className = "!border-border"
        "#;
        assert_eq!(
            sweep_colors(text, palette),
            vec![
                "border".to_string(),
                "danger".to_string(),
                "primary".to_string(),
                "primary-foreground".to_string(),
                "ring".to_string(),
            ]
        );
    }

    #[test]
    fn test_sweep_colors_ignores_unknown_names() {
        let palette = SemanticPalette::global();
        assert!(sweep_colors("bg-chartreuse text-sm", palette).is_empty());
    }

    #[test]
    fn test_discover_missing_dir_errors() {
        let result = discover(Path::new("/nonexistent/components"));
        assert!(matches!(result, Err(RegistryError::MissingDir { .. })));
    }

    #[test]
    fn test_discover_pairs_stories_and_sorts() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("card.tsx"), "").unwrap();
        std::fs::write(dir.path().join("button.tsx"), "").unwrap();
        std::fs::write(dir.path().join("button.stories.tsx"), "").unwrap();
        std::fs::write(dir.path().join("notes.md"), "").unwrap();

        let sources = discover(dir.path()).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "button");
        assert!(sources[0].story_path.is_some());
        assert_eq!(sources[1].name, "card");
        assert!(sources[1].story_path.is_none());
    }
}
