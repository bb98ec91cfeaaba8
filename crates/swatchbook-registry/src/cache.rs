//! Content-hash keyed cache of extracted component metadata.
//!
//! The cache keeps registry rebuilds proportional to what changed: a
//! component whose source and story files hash the same as last run is
//! served from the cache instead of re-extracted. The cache is one JSON
//! document on disk, read once at process start and written once at the
//! end of a run; nothing else reads or writes it.
//!
//! Corruption is never fatal. An unreadable, unparseable, or
//! version-mismatched cache file loads as empty and the run silently
//! rebuilds everything.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RegistryError, Result};
use crate::schema::ComponentSchema;

/// Cache document format version.
///
/// Bump this whenever extraction *rules* change — the content hashes only
/// cover component source files, not the extractor's own logic, so a rule
/// change with an unbumped version serves stale metadata. This is a manual
/// trust boundary; hashing the extractor's rule tables into the key would
/// make it automatic.
pub const CACHE_VERSION: u32 = 3;

/// One cached extraction result.
///
/// Entries are created on first successful extraction and replaced
/// wholesale whenever either content hash or the format version changes;
/// they are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub component_name: String,
    pub source_hash: String,
    pub story_hash: String,
    pub cache_version: u32,
    pub generated_at: DateTime<Utc>,
    pub metadata: ComponentSchema,
}

impl CacheEntry {
    /// Builds an entry stamped with the current format version and time.
    pub fn new(
        component_name: impl Into<String>,
        source_hash: impl Into<String>,
        story_hash: impl Into<String>,
        metadata: ComponentSchema,
    ) -> Self {
        CacheEntry {
            component_name: component_name.into(),
            source_hash: source_hash.into(),
            story_hash: story_hash.into(),
            cache_version: CACHE_VERSION,
            generated_at: Utc::now(),
            metadata,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    entries: BTreeMap<String, CacheEntry>,
}

/// The persistent extraction cache.
#[derive(Debug)]
pub struct RegistryCache {
    path: Option<PathBuf>,
    entries: BTreeMap<String, CacheEntry>,
}

impl RegistryCache {
    /// An empty cache with no backing file.
    pub fn in_memory() -> Self {
        RegistryCache {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    /// Loads the cache from disk.
    ///
    /// A missing file is a normal first run. A corrupt file or one written
    /// by a different format version is treated as empty — the run rebuilds
    /// everything rather than failing.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<CacheFile>(&content) {
                Ok(file) if file.version == CACHE_VERSION => file.entries,
                Ok(file) => {
                    debug!(
                        found = file.version,
                        expected = CACHE_VERSION,
                        "cache format version mismatch, starting empty"
                    );
                    BTreeMap::new()
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "corrupt cache file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        RegistryCache {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    /// Looks up cached metadata.
    ///
    /// A hit requires the component name, both content hashes, *and* the
    /// entry's format version to all match. Anything else is a full miss —
    /// there is no partial invalidation.
    pub fn get(
        &self,
        component_name: &str,
        source_hash: &str,
        story_hash: &str,
    ) -> Option<&ComponentSchema> {
        let entry = self.entries.get(component_name)?;
        (entry.cache_version == CACHE_VERSION
            && entry.source_hash == source_hash
            && entry.story_hash == story_hash)
            .then_some(&entry.metadata)
    }

    /// Stores an entry, replacing any previous entry for the component.
    pub fn put(&mut self, entry: CacheEntry) {
        self.entries.insert(entry.component_name.clone(), entry);
    }

    /// Writes the cache document to its backing file, if any.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = CacheFile {
            version: CACHE_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Number of cached components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw entry for a component, regardless of hash validity.
    pub fn entry(&self, component_name: &str) -> Option<&CacheEntry> {
        self.entries.get(component_name)
    }
}
