//! Build-state cache: skip builds whose sources have not changed
//!
//! One [`BuildState`] is kept per `project:platform` pair. A build counts as
//! current only if its output still exists, the last attempt succeeded, the
//! source tree hashes to the recorded value, and the output is not older
//! than the recorded build time. State is written after every attempt,
//! failed ones included, so a failure is never mistaken for "nothing to do".

use crate::cache::content_hash::{content_hash_with, HashPolicy};
use crate::cache::persist;
use crate::error::KilnResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Recorded outcome of the last build of a project for a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildState {
    pub project: String,
    pub platform: String,
    pub output_path: PathBuf,
    pub source_hash: String,
    pub last_build: DateTime<Utc>,
    pub build_success: bool,
}

/// Why a build has to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildReason {
    /// Nothing recorded for this project and platform
    NoPreviousBuild,
    /// The recorded output file is gone
    OutputMissing,
    /// The last recorded attempt failed
    PreviousBuildFailed,
    /// The source tree hash differs from the recorded one
    SourcesChanged,
    /// The output was modified to something older than the recorded build
    OutputOlderThanBuild,
    /// The source tree could not be hashed
    HashUnavailable(String),
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPreviousBuild => write!(f, "no previous build"),
            Self::OutputMissing => write!(f, "output file missing"),
            Self::PreviousBuildFailed => write!(f, "previous build failed"),
            Self::SourcesChanged => write!(f, "source files changed"),
            Self::OutputOlderThanBuild => write!(f, "output modified since last build"),
            Self::HashUnavailable(e) => write!(f, "cannot hash sources: {}", e),
        }
    }
}

/// Persisted map from `project:platform` to its last [`BuildState`]
#[derive(Debug, Clone)]
pub struct BuildStateCache {
    path: PathBuf,
    states: BTreeMap<String, BuildState>,
    policy: HashPolicy,
}

impl BuildStateCache {
    /// Create an empty cache that will persist to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            states: BTreeMap::new(),
            policy: HashPolicy::default(),
        }
    }

    /// Load the cache from `path`.
    ///
    /// A missing, empty or corrupted file yields an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> KilnResult<Self> {
        let path = path.into();
        let states: BTreeMap<String, BuildState> = persist::load_or_default(&path)?;
        debug!(
            "Loaded {} build states from {}",
            states.len(),
            path.display()
        );
        Ok(Self {
            path,
            states,
            policy: HashPolicy::default(),
        })
    }

    /// Use a non-default content-hash policy
    pub fn with_policy(mut self, policy: HashPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Cache key for a project and platform
    pub fn key(project: &str, platform: &str) -> String {
        format!("{}:{}", project, platform)
    }

    /// Recorded state for a project and platform
    pub fn get(&self, project: &str, platform: &str) -> Option<&BuildState> {
        self.states.get(&Self::key(project, platform))
    }

    /// Hash `source_dir` with this cache's policy
    pub fn content_hash(&self, source_dir: &Path) -> KilnResult<String> {
        content_hash_with(source_dir, &self.policy)
    }

    /// Decide whether a build must run. `None` means the output is current.
    pub fn needs_rebuild(
        &self,
        project: &str,
        platform: &str,
        source_dir: &Path,
        output_path: &Path,
    ) -> Option<RebuildReason> {
        let reason = self.check(project, platform, source_dir, output_path);
        match &reason {
            Some(r) => debug!(project, platform, reason = %r, "Rebuild required"),
            None => debug!(project, platform, "Build is up to date"),
        }
        reason
    }

    fn check(
        &self,
        project: &str,
        platform: &str,
        source_dir: &Path,
        output_path: &Path,
    ) -> Option<RebuildReason> {
        let Some(state) = self.get(project, platform) else {
            return Some(RebuildReason::NoPreviousBuild);
        };

        let Ok(output_meta) = fs::metadata(output_path) else {
            return Some(RebuildReason::OutputMissing);
        };

        if !state.build_success {
            return Some(RebuildReason::PreviousBuildFailed);
        }

        match self.content_hash(source_dir) {
            Ok(hash) if hash != state.source_hash => return Some(RebuildReason::SourcesChanged),
            Ok(_) => {}
            Err(e) => return Some(RebuildReason::HashUnavailable(e.to_string())),
        }

        if let Ok(modified) = output_meta.modified() {
            if DateTime::<Utc>::from(modified) < state.last_build {
                return Some(RebuildReason::OutputOlderThanBuild);
            }
        }

        None
    }

    /// Record the outcome of a build attempt and persist the cache.
    ///
    /// Must be called after every attempt, successful or not. The recorded
    /// build time is the output's modification time when it exists, so a
    /// later swap to an older file is detected.
    pub fn record_build(
        &mut self,
        project: &str,
        platform: &str,
        source_dir: &Path,
        output_path: &Path,
        succeeded: bool,
    ) -> KilnResult<()> {
        let source_hash = match self.content_hash(source_dir) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(project, platform, error = %e, "Recording build without a source hash");
                String::new()
            }
        };

        let last_build = fs::metadata(output_path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        let state = BuildState {
            project: project.to_string(),
            platform: platform.to_string(),
            output_path: output_path.to_path_buf(),
            source_hash,
            last_build,
            build_success: succeeded,
        };
        self.states.insert(Self::key(project, platform), state);

        info!(
            project,
            platform,
            succeeded,
            "Recorded build of {}",
            output_path.display()
        );
        self.save()
    }

    /// Forget the state of one project and platform
    pub fn invalidate(&mut self, project: &str, platform: &str) -> Option<BuildState> {
        self.states.remove(&Self::key(project, platform))
    }

    /// Forget every recorded build
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// States in key order
    pub fn states(&self) -> impl Iterator<Item = &BuildState> {
        self.states.values()
    }

    /// File this cache persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write all states to disk
    pub fn save(&self) -> KilnResult<()> {
        persist::save_atomic(&self.path, &self.states)
    }
}
