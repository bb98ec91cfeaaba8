//! End-to-end assembly tests: cache idempotence and invalidation.

use std::path::Path;

use swatchbook_registry::{
    assemble, AssembleOptions, ComponentKind, RegistryCache,
};
use swatchbook_style::SemanticPalette;
use tempfile::TempDir;

const BUTTON: &str = r#"
export const buttonVariants = {
  base: "inline-flex items-center rounded-md",
  size: {
    sm: { classes: "h-8 px-3 text-xs", description: "Compact" },
    base: { classes: "h-9 px-4 text-sm" },
  },
  variant: {
    default: { classes: "bg-primary text-primary-foreground hover:bg-primary/90" },
    destructive: { classes: "bg-danger text-white" },
  },
}
export const buttonDefaultVariants = { size: "base", variant: "default" }
export const buttonStyling = { category: "form", description: "Clickable button" }
"#;

const BADGE: &str = r#"
export const badgeVariants = {
  tone: {
    neutral: { classes: "bg-muted text-muted-foreground" },
    brand: { classes: "bg-brand text-white" },
  },
}
export const badgeDefaultVariants = { tone: "neutral" }
"#;

const HERO_BLOCK: &str = r#"
export const heroVariants = {
  layout: {
    centered: { classes: "px-8 py-12" },
  },
}
export const heroDefaultVariants = { layout: "centered" }
export const heroStyling = {
  type: "block",
  category: "marketing",
  subComponents: ["button", "badge"],
}
"#;

fn write_components(dir: &Path) {
    std::fs::write(dir.join("button.tsx"), BUTTON).unwrap();
    std::fs::write(dir.join("button.stories.tsx"), "export const Primary = {}").unwrap();
    std::fs::write(dir.join("badge.tsx"), BADGE).unwrap();
    std::fs::write(dir.join("hero.tsx"), HERO_BLOCK).unwrap();
}

#[test]
fn test_round_trip_variants_and_defaults() {
    let dir = TempDir::new().unwrap();
    write_components(dir.path());

    let mut cache = RegistryCache::in_memory();
    let (registry, _) = assemble(
        &AssembleOptions::new(dir.path()),
        &mut cache,
        SemanticPalette::global(),
    )
    .unwrap();

    let button = &registry.components["button"];
    let size = &button.props["size"];
    assert_eq!(size.default.as_deref(), Some("base"));
    assert!(size.values.contains(&"base".to_string()));
    assert!(size.values.contains(&"sm".to_string()));
    assert!(!size.required);
    assert_eq!(size.descriptions["sm"], "Compact");
    assert_eq!(
        button.props["variant"].state_classes["default"]["hover"],
        "bg-primary/90"
    );
    assert_eq!(button.description.as_deref(), Some("Clickable button"));
    assert_eq!(button.category.as_deref(), Some("form"));
    assert_eq!(button.import_path, "@/components/ui/button");
    assert!(button
        .colors
        .iter()
        .any(|color| color == "primary-foreground"));
}

#[test]
fn test_badge_without_defaults_entry_is_required() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("chip.tsx"),
        r#"
        const chipVariants = { tone: { calm: "bg-muted" }, pad: { tight: "px-2" } }
        const chipDefaultVariants = { tone: "calm" }
        "#,
    )
    .unwrap();

    let mut cache = RegistryCache::in_memory();
    let (registry, _) = assemble(
        &AssembleOptions::new(dir.path()),
        &mut cache,
        SemanticPalette::global(),
    )
    .unwrap();

    let chip = &registry.components["chip"];
    assert!(!chip.props["tone"].required);
    assert!(chip.props["pad"].required);
}

#[test]
fn test_blocks_subset_and_search_indexes() {
    let dir = TempDir::new().unwrap();
    write_components(dir.path());

    let mut cache = RegistryCache::in_memory();
    let (registry, _) = assemble(
        &AssembleOptions::new(dir.path()),
        &mut cache,
        SemanticPalette::global(),
    )
    .unwrap();

    assert_eq!(registry.components["hero"].kind, ComponentKind::Block);
    let hero_block = &registry.blocks["hero"];
    assert_eq!(hero_block.components, vec!["button", "badge"]);

    assert_eq!(registry.search.by_name, vec!["badge", "button", "hero"]);
    assert_eq!(registry.search.by_category["form"], vec!["button"]);
    assert_eq!(registry.search.by_type["block"], vec!["hero"]);
    assert_eq!(registry.search.by_type["component"], vec!["badge", "button"]);
}

#[test]
fn test_components_without_tables_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_components(dir.path());
    std::fs::write(dir.path().join("plain.tsx"), "export function Plain() {}").unwrap();

    let mut cache = RegistryCache::in_memory();
    let (registry, stats) = assemble(
        &AssembleOptions::new(dir.path()),
        &mut cache,
        SemanticPalette::global(),
    )
    .unwrap();

    assert!(!registry.components.contains_key("plain"));
    assert_eq!(stats.skipped, 1);
}

#[test]
fn test_second_run_is_byte_identical_and_all_hits() {
    let dir = TempDir::new().unwrap();
    write_components(dir.path());
    let cache_path = dir.path().join("cache.json");
    let options = AssembleOptions::new(dir.path());
    let palette = SemanticPalette::global();

    let mut cache = RegistryCache::load(&cache_path);
    let (first, first_stats) = assemble(&options, &mut cache, palette).unwrap();
    cache.save().unwrap();
    assert_eq!(first_stats.hits, 0);
    assert_eq!(first_stats.misses, 3);

    let mut cache = RegistryCache::load(&cache_path);
    let (second, second_stats) = assemble(&options, &mut cache, palette).unwrap();
    assert_eq!(second_stats.misses, 0);
    assert_eq!(second_stats.hits, 3);
    assert_eq!(
        first.to_pretty_json().unwrap(),
        second.to_pretty_json().unwrap()
    );
}

#[test]
fn test_touching_one_source_invalidates_only_that_component() {
    let dir = TempDir::new().unwrap();
    write_components(dir.path());
    let cache_path = dir.path().join("cache.json");
    let options = AssembleOptions::new(dir.path());
    let palette = SemanticPalette::global();

    let mut cache = RegistryCache::load(&cache_path);
    assemble(&options, &mut cache, palette).unwrap();
    cache.save().unwrap();

    let before = RegistryCache::load(&cache_path);
    let badge_before = before.entry("badge").cloned().unwrap();
    let button_before = before.entry("button").cloned().unwrap();

    // Any content change — even whitespace — flips the hash.
    std::fs::write(dir.path().join("button.tsx"), format!("{BUTTON}\n")).unwrap();

    let mut cache = RegistryCache::load(&cache_path);
    let (_, stats) = assemble(&options, &mut cache, palette).unwrap();
    cache.save().unwrap();

    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);

    let reloaded = RegistryCache::load(&cache_path);
    let badge_after = reloaded.entry("badge").cloned().unwrap();
    assert_eq!(badge_before, badge_after);
    assert_ne!(
        button_before.source_hash,
        reloaded.entry("button").unwrap().source_hash
    );
}

#[test]
fn test_story_content_change_invalidates() {
    let dir = TempDir::new().unwrap();
    write_components(dir.path());
    let cache_path = dir.path().join("cache.json");
    let options = AssembleOptions::new(dir.path());
    let palette = SemanticPalette::global();

    let mut cache = RegistryCache::load(&cache_path);
    assemble(&options, &mut cache, palette).unwrap();
    cache.save().unwrap();

    std::fs::write(
        dir.path().join("button.stories.tsx"),
        "export const Primary = {}\nexport const Ghost = {}",
    )
    .unwrap();

    let mut cache = RegistryCache::load(&cache_path);
    let (_, stats) = assemble(&options, &mut cache, palette).unwrap();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
}
