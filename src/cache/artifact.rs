//! Artifact cache: the ledger of installed SDKs, tools and images
//!
//! An entry records that artifact `name` at `version` was verified with
//! `checksum` and materialized at `installPath`. A request only counts as
//! cached if both its checksum and its install path match the stored entry;
//! anything else forces a fresh install.

use crate::cache::persist;
use crate::error::KilnResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Caller-supplied description of an artifact that should exist on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactRequest {
    /// Cache key and display name
    pub name: String,
    /// Informational version string
    pub version: String,
    /// Download URL. Empty means the artifact must be installed by hand.
    pub url: String,
    /// Expected SHA-256, optionally prefixed with `sha256:`. Empty disables
    /// verification.
    pub checksum: String,
    /// Install path specification, resolved by [`crate::paths::PathResolver`]
    #[serde(alias = "installPath")]
    pub install_path: String,
}

impl ArtifactRequest {
    /// Create a request with no URL or checksum
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    /// Set the download URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the expected checksum
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = checksum.into();
        self
    }

    /// Set the install path specification
    pub fn with_install_path(mut self, install_path: impl Into<String>) -> Self {
        self.install_path = install_path.into();
        self
    }

    /// Whether the artifact can be downloaded automatically
    pub fn is_downloadable(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Persisted record of a completed install
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheEntry {
    pub name: String,
    pub version: String,
    pub checksum: String,
    #[serde(rename = "installPath")]
    pub install_path: String,
}

impl From<&ArtifactRequest> for CacheEntry {
    fn from(req: &ArtifactRequest) -> Self {
        Self {
            name: req.name.clone(),
            version: req.version.clone(),
            checksum: req.checksum.clone(),
            install_path: req.install_path.clone(),
        }
    }
}

/// On-disk shape: `{"entries": {"<name>": {...}}}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default)]
    entries: BTreeMap<String, CacheEntry>,
}

/// Persisted map from artifact name to its last successful install
#[derive(Debug, Clone)]
pub struct ArtifactCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl ArtifactCache {
    /// Create an empty cache that will persist to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Load the cache from `path`.
    ///
    /// A missing, empty or corrupted file yields an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> KilnResult<Self> {
        let path = path.into();
        let file: CacheFile = persist::load_or_default(&path)?;
        debug!(
            "Loaded {} artifact cache entries from {}",
            file.entries.len(),
            path.display()
        );
        Ok(Self {
            path,
            entries: file.entries,
        })
    }

    /// Whether `req` matches a recorded install by checksum and install path
    pub fn is_cached(&self, req: &ArtifactRequest) -> bool {
        self.entries.get(&req.name).is_some_and(|entry| {
            entry.checksum == req.checksum && entry.install_path == req.install_path
        })
    }

    /// Look up the entry for `name`
    pub fn get(&self, name: &str) -> Option<&CacheEntry> {
        self.entries.get(name)
    }

    /// Record `req` as installed, replacing any previous entry for its name
    pub fn add(&mut self, req: &ArtifactRequest) {
        self.insert(CacheEntry::from(req));
    }

    /// Insert a prebuilt entry, replacing any previous entry for its name
    pub fn insert(&mut self, entry: CacheEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Forget a single artifact
    pub fn remove(&mut self, name: &str) -> Option<CacheEntry> {
        self.entries.remove(name)
    }

    /// Forget every artifact
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in name order
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File this cache persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all entries to disk
    pub fn save(&self) -> KilnResult<()> {
        let file = CacheFile {
            entries: self.entries.clone(),
        };
        persist::save_atomic(&self.path, &file)
    }
}
