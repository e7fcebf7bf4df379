//! Artifact manifests
//!
//! A manifest lists the artifacts a project needs, installed in file order:
//!
//! ```toml
//! [[sdk]]
//! name = "android-ndk"
//! version = "r26d"
//! url = "https://dl.google.com/android/repository/android-ndk-r26d-linux.zip"
//! checksum = "sha256:..."
//! install_path = "sdks/android-ndk"
//!
//! [[sdk]]
//! name = "xcode"
//! version = "15.4"
//! install_path = "/Applications/Xcode.app"
//! ```

use crate::cache::ArtifactRequest;
use crate::error::{KilnError, KilnResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parsed artifact manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "sdk")]
    pub artifacts: Vec<ArtifactRequest>,
}

impl Manifest {
    /// Read and validate a manifest file
    pub fn load(path: &Path) -> KilnResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| KilnError::io(format!("reading {}", path.display()), e))?;
        Self::parse(&content).map_err(|reason| KilnError::ManifestInvalid {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse manifest text, returning a human-readable reason on failure
    pub fn parse(content: &str) -> Result<Self, String> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| e.to_string())?;
        manifest.validate()?;
        Ok(manifest)
    }

    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for (i, req) in self.artifacts.iter().enumerate() {
            if req.name.trim().is_empty() {
                return Err(format!("sdk entry {} has no name", i + 1));
            }
            if !seen.insert(req.name.as_str()) {
                return Err(format!("duplicate sdk name '{}'", req.name));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
