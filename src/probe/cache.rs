//! Session-scoped probe cache.
//!
//! The cache maps a dependency key to its probed outcome so a key is probed
//! at most once per configuration session. Whether the filesystem changed
//! after the first probe is irrelevant within a session: the cached outcome
//! governs (stale-by-design).
//!
//! The cache is an explicit object the caller passes into each probe, never
//! ambient global state, so tests can supply a fresh or pre-seeded cache.
//! It can optionally be persisted to a TOML file between sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::result::ProbeResult;

/// Cached outcome of one probed key.
///
/// Together with "key absent" this forms the tri-state
/// {found, not-found, not-yet-probed}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "outcome")]
pub enum CachedOutcome {
    /// The dependency was located.
    Found {
        /// Directory containing the matched header, if located.
        header_path: Option<PathBuf>,
        /// Path of the matched binary artifact, if located.
        library_path: Option<PathBuf>,
    },
    /// The dependency was not located.
    NotFound,
}

impl CachedOutcome {
    /// Record a probe result.
    pub fn from_result(result: &ProbeResult) -> Self {
        if result.found {
            CachedOutcome::Found {
                header_path: result.header_path.clone(),
                library_path: result.library_path.clone(),
            }
        } else {
            CachedOutcome::NotFound
        }
    }

    /// Reconstruct the probe result this outcome was recorded from.
    pub fn to_result(&self) -> ProbeResult {
        match self {
            CachedOutcome::Found {
                header_path,
                library_path,
            } => ProbeResult {
                found: true,
                header_path: header_path.clone(),
                library_path: library_path.clone(),
            },
            CachedOutcome::NotFound => ProbeResult::not_found(),
        }
    }
}

/// Per-session cache of probe outcomes, keyed by dependency identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeCache {
    entries: BTreeMap<String, CachedOutcome>,
}

impl ProbeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        ProbeCache::default()
    }

    /// Look up a previously probed key.
    pub fn get(&self, key: &str) -> Option<&CachedOutcome> {
        self.entries.get(key)
    }

    /// Whether a key has been probed this session.
    pub fn is_probed(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Record the outcome for a key.
    pub fn insert(&mut self, key: impl Into<String>, outcome: CachedOutcome) {
        self.entries.insert(key.into(), outcome);
    }

    /// Iterate over all recorded outcomes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CachedOutcome)> {
        self.entries.iter()
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache has no recorded outcomes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget all recorded outcomes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Load a persisted cache, returning an empty cache if the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(ProbeCache::new());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read probe cache: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse probe cache: {}", path.display()))
    }

    /// Persist the cache, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create cache directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).context("failed to serialize probe cache")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write probe cache: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_tri_state() {
        let mut cache = ProbeCache::new();
        assert!(!cache.is_probed("zlib"));

        cache.insert("zlib", CachedOutcome::NotFound);
        assert!(cache.is_probed("zlib"));
        assert_eq!(cache.get("zlib"), Some(&CachedOutcome::NotFound));

        cache.insert(
            "png",
            CachedOutcome::Found {
                header_path: Some(PathBuf::from("/usr/include")),
                library_path: Some(PathBuf::from("/usr/lib/libpng.so")),
            },
        );
        assert_eq!(cache.len(), 2);

        let result = cache.get("png").unwrap().to_result();
        assert!(result.found);
        assert_eq!(result.header_path, Some(PathBuf::from("/usr/include")));
    }

    #[test]
    fn test_outcome_round_trips_result() {
        let result = ProbeResult {
            found: true,
            header_path: Some(PathBuf::from("/opt/foo/include")),
            library_path: None,
        };
        assert_eq!(CachedOutcome::from_result(&result).to_result(), result);

        let miss = ProbeResult::not_found();
        assert_eq!(CachedOutcome::from_result(&miss).to_result(), miss);
    }

    #[test]
    fn test_persistence() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cache").join("probe-cache.toml");

        let mut cache = ProbeCache::new();
        cache.insert(
            "zlib",
            CachedOutcome::Found {
                header_path: Some(PathBuf::from("/usr/include")),
                library_path: Some(PathBuf::from("/usr/lib/libz.so")),
            },
        );
        cache.insert("missing-lib", CachedOutcome::NotFound);
        cache.save(&path).unwrap();

        let loaded = ProbeCache::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("missing-lib"), Some(&CachedOutcome::NotFound));
        assert!(loaded.get("zlib").unwrap().to_result().found);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let cache = ProbeCache::load(&tmp.path().join("absent.toml")).unwrap();
        assert!(cache.is_empty());
    }
}
