//! Configuration schema for Kiln
//!
//! Configuration is stored at `~/.config/kiln/config.toml`

use crate::cache::content_hash::HashPolicy;
use crate::config::ConfigManager;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides the SDK root directory
pub const SDK_ROOT_ENV: &str = "KILN_SDK_ROOT";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Filesystem locations
    pub paths: PathsConfig,

    /// Build-state cache settings
    pub build: BuildConfig,
}

impl Config {
    /// Directory that `sdks/` install paths and empty specs resolve into.
    ///
    /// `KILN_SDK_ROOT` wins over the config file, which wins over the
    /// platform data directory.
    pub fn sdk_root(&self) -> PathBuf {
        if let Some(root) = std::env::var_os(SDK_ROOT_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(root);
        }
        self.paths
            .sdk_root
            .clone()
            .unwrap_or_else(ConfigManager::default_sdk_root)
    }

    /// Location of the artifact cache file
    pub fn artifact_cache_path(&self) -> PathBuf {
        self.paths
            .artifact_cache
            .clone()
            .unwrap_or_else(|| ConfigManager::cache_dir().join("artifacts.json"))
    }

    /// Location of the build-state cache file
    pub fn build_cache_path(&self) -> PathBuf {
        self.paths
            .build_cache
            .clone()
            .unwrap_or_else(|| ConfigManager::cache_dir().join("builds.json"))
    }

    /// Content-hash policy with the configured extensions applied
    pub fn hash_policy(&self) -> HashPolicy {
        let mut policy = HashPolicy::default().with_max_hashed_bytes(self.build.max_hashed_file_bytes);
        for dir in &self.build.extra_skip_dirs {
            policy = policy.skip_dir(dir);
        }
        for ext in &self.build.extra_extensions {
            policy = policy.track_extension(ext);
        }
        policy
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Filesystem location overrides. Unset values fall back to the
/// platform's data and cache directories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root directory for installed SDKs
    pub sdk_root: Option<PathBuf>,

    /// Artifact cache file
    pub artifact_cache: Option<PathBuf>,

    /// Build-state cache file
    pub build_cache: Option<PathBuf>,
}

/// Build-state cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Files at or above this size contribute only path and mtime to the
    /// content hash
    pub max_hashed_file_bytes: u64,

    /// Additional directory names to skip when hashing sources
    pub extra_skip_dirs: Vec<String>,

    /// Additional file extensions to track when hashing sources
    pub extra_extensions: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_hashed_file_bytes: crate::cache::content_hash::DEFAULT_MAX_HASHED_BYTES,
            extra_skip_dirs: vec![],
            extra_extensions: vec![],
        }
    }
}
