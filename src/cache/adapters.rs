//! Domain-specific views over [`ArtifactCache`]
//!
//! Subsystems that manage things other than SDKs (VM apps and disk images,
//! developer tools installed through a package manager) reuse the artifact
//! ledger by deriving their own cache keys. The cache handle is always
//! passed in by the caller.

use crate::cache::artifact::{ArtifactCache, ArtifactRequest};
use crate::error::KilnResult;
use tracing::debug;

/// Checksum stand-in for tools installed via `go install`, where no
/// archive digest exists
pub const GO_INSTALL_SENTINEL: &str = "go-install";

/// Cache view for a virtualization app and the ISO images it boots.
///
/// Keys look like `utm-app-5.0.1` and `utm-iso-debian-13-arm`.
#[derive(Debug, Clone)]
pub struct VmImageCache {
    kind: String,
}

impl VmImageCache {
    /// Create a view for the given VM kind (e.g. `utm`)
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Cache key for the VM application at `version`
    pub fn app_key(&self, version: &str) -> String {
        format!("{}-app-{}", self.kind, version)
    }

    /// Cache key for the ISO image identified by `image_key`
    pub fn iso_key(&self, image_key: &str) -> String {
        format!("{}-iso-{}", self.kind, image_key)
    }

    /// Request describing the VM application
    pub fn app_request(&self, version: &str, checksum: &str, install_path: &str) -> ArtifactRequest {
        ArtifactRequest::new(self.app_key(version), version)
            .with_checksum(checksum)
            .with_install_path(install_path)
    }

    /// Request describing an ISO image
    pub fn iso_request(&self, image_key: &str, checksum: &str, install_path: &str) -> ArtifactRequest {
        ArtifactRequest::new(self.iso_key(image_key), image_key)
            .with_checksum(checksum)
            .with_install_path(install_path)
    }

    pub fn is_app_cached(
        &self,
        cache: &ArtifactCache,
        version: &str,
        checksum: &str,
        install_path: &str,
    ) -> bool {
        cache.is_cached(&self.app_request(version, checksum, install_path))
    }

    pub fn is_iso_cached(
        &self,
        cache: &ArtifactCache,
        image_key: &str,
        checksum: &str,
        install_path: &str,
    ) -> bool {
        cache.is_cached(&self.iso_request(image_key, checksum, install_path))
    }

    /// Record the VM application and persist the cache
    pub fn record_app(
        &self,
        cache: &mut ArtifactCache,
        version: &str,
        checksum: &str,
        install_path: &str,
    ) -> KilnResult<()> {
        let req = self.app_request(version, checksum, install_path);
        debug!("Recording {} in artifact cache", req.name);
        cache.add(&req);
        cache.save()
    }

    /// Record an ISO image and persist the cache
    pub fn record_iso(
        &self,
        cache: &mut ArtifactCache,
        image_key: &str,
        checksum: &str,
        install_path: &str,
    ) -> KilnResult<()> {
        let req = self.iso_request(image_key, checksum, install_path);
        debug!("Recording {} in artifact cache", req.name);
        cache.add(&req);
        cache.save()
    }
}

/// Cache view for developer tools installed through a package manager.
///
/// Tools are keyed by their fixed name; the checksum slot holds
/// [`GO_INSTALL_SENTINEL`] since there is no archive to verify.
#[derive(Debug, Clone, Default)]
pub struct ToolCache;

impl ToolCache {
    pub fn new() -> Self {
        Self
    }

    fn request(tool: &str, version: &str, install_path: &str) -> ArtifactRequest {
        ArtifactRequest::new(tool, version)
            .with_checksum(GO_INSTALL_SENTINEL)
            .with_install_path(install_path)
    }

    /// Whether `tool` was recorded at `install_path`
    pub fn is_installed(&self, cache: &ArtifactCache, tool: &str, install_path: &str) -> bool {
        cache.is_cached(&Self::request(tool, "", install_path))
    }

    /// Installed version of `tool`, if recorded by this view
    pub fn installed_version<'a>(&self, cache: &'a ArtifactCache, tool: &str) -> Option<&'a str> {
        cache
            .get(tool)
            .filter(|e| e.checksum == GO_INSTALL_SENTINEL)
            .map(|e| e.version.as_str())
    }

    /// Record `tool` as installed and persist the cache
    pub fn record_installed(
        &self,
        cache: &mut ArtifactCache,
        tool: &str,
        version: &str,
        install_path: &str,
    ) -> KilnResult<()> {
        cache.add(&Self::request(tool, version, install_path));
        cache.save()
    }
}
