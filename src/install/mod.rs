//! Artifact installation pipeline
//!
//! `install` walks one request through:
//!
//! ```text
//! cached? ──yes──▶ AlreadyCached
//!    │no
//! resolve path ─▶ matching install at dest? ──yes──▶ record ─▶ Adopted
//!    │no
//! url set? ──no──▶ ManualInstallRequired
//!    │yes
//! download+hash ─▶ verify ─▶ extract into staging ─▶ mark complete
//!    ─▶ rename into dest ─▶ record ─▶ Installed
//! ```
//!
//! A checksum mismatch aborts before the destination is touched. The
//! temporary download is removed on every exit path. Extraction happens in
//! a hidden sibling of `dest` that is renamed into place only once it holds
//! the completion marker, so a failed extraction never leaves a half-written
//! `dest` behind. The only directories ever replaced are ones carrying a
//! marker, i.e. ones this installer wrote.

pub mod archive;
pub mod checksum;
pub mod download;
#[cfg(test)]
pub(crate) mod testing;

pub use archive::ArchiveKind;
pub use download::{Fetcher, HttpFetcher};

use crate::cache::{ArtifactCache, ArtifactRequest};
use crate::error::{KilnError, KilnResult};
use crate::paths::PathResolver;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Written inside an install directory once extraction has finished
pub const COMPLETE_MARKER: &str = ".kiln-complete";

const STAGING_PREFIX: &str = ".kiln-staging-";
const RETIRED_PREFIX: &str = ".kiln-retired-";

/// What `install` did for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The cache already recorded this checksum at this path
    AlreadyCached,
    /// A complete install was found at the destination and recorded
    Adopted(PathBuf),
    /// Downloaded, verified and extracted
    Installed(PathBuf),
}

/// Environment variable an operator should export for a tool family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationHint {
    pub var: &'static str,
    pub value: PathBuf,
}

impl ActivationHint {
    /// Shell line that activates the tool
    pub fn export_line(&self) -> String {
        format!("export {}=\"{}\"", self.var, self.value.display())
    }
}

/// Tool families whose activation requires an environment variable
const ACTIVATION_VARS: &[(&str, &str)] = &[
    ("android-ndk", "ANDROID_NDK_HOME"),
    ("android-sdk", "ANDROID_HOME"),
    ("openjdk", "JAVA_HOME"),
    ("jdk", "JAVA_HOME"),
    ("flutter", "FLUTTER_ROOT"),
];

/// Operator hint for artifacts that need an environment variable
pub fn activation_hint(name: &str, install_dir: &Path) -> Option<ActivationHint> {
    let lower = name.to_ascii_lowercase();
    ACTIVATION_VARS
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, var)| ActivationHint {
            var,
            value: install_dir.to_path_buf(),
        })
}

#[derive(Debug, Serialize, Deserialize)]
struct CompletionMarker {
    name: String,
    version: String,
    checksum: String,
}

impl CompletionMarker {
    /// Whether the marked install holds the bits `req` asks for
    fn matches(&self, req: &ArtifactRequest, expected: Option<&str>) -> bool {
        let recorded = checksum::parse_expected(&self.checksum).ok().flatten();
        self.version == req.version && recorded.as_deref() == expected
    }
}

/// State of the destination before installing
#[derive(Debug, PartialEq, Eq)]
enum Existing {
    Missing,
    /// An empty directory, safe to install into
    Empty,
    /// Holds what the request asks for
    Complete,
    /// Marked by a previous install of different bits
    Stale,
    /// Non-empty and unmarked: not ours to replace
    Foreign,
}

/// Drives artifact requests to an installed, recorded state
pub struct Installer<F: Fetcher = HttpFetcher> {
    resolver: PathResolver,
    fetcher: F,
    tmp_dir: PathBuf,
}

impl<F: Fetcher> Installer<F> {
    pub fn new(resolver: PathResolver, fetcher: F) -> Self {
        Self {
            resolver,
            fetcher,
            tmp_dir: std::env::temp_dir(),
        }
    }

    /// Directory for in-flight downloads
    pub fn with_tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = dir.into();
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Make `req` exist on disk and be recorded in `cache`
    pub fn install(
        &self,
        req: &ArtifactRequest,
        cache: &mut ArtifactCache,
    ) -> KilnResult<InstallOutcome> {
        if cache.is_cached(req) {
            info!(name = %req.name, "Already installed");
            return Ok(InstallOutcome::AlreadyCached);
        }

        let dest = self.resolver.resolve(&req.install_path)?;
        let expected = checksum::parse_expected(&req.checksum)?;

        if req.is_downloadable() && dest == self.resolver.resolve("")? {
            return Err(KilnError::PathInvalid {
                spec: req.install_path.clone(),
                reason: "resolves to the SDK root, downloads need their own directory"
                    .to_string(),
            });
        }

        let existing = inspect_existing(&dest, req, expected.as_deref())?;
        match existing {
            Existing::Complete => {
                info!(name = %req.name, path = %dest.display(), "Adopting existing install");
                cache.add(req);
                cache.save()?;
                return Ok(InstallOutcome::Adopted(dest));
            }
            Existing::Foreign => {
                return Err(KilnError::DestinationOccupied {
                    name: req.name.clone(),
                    path: dest,
                });
            }
            Existing::Stale => {
                info!(
                    name = %req.name,
                    path = %dest.display(),
                    "Installed copy does not match the request, replacing"
                );
            }
            Existing::Missing | Existing::Empty => {}
        }

        if !req.is_downloadable() {
            return Err(KilnError::ManualInstallRequired {
                name: req.name.clone(),
                path: dest,
            });
        }

        info!(name = %req.name, version = %req.version, "Downloading {}", req.url);
        let download = download::download_to_temp(&self.fetcher, &req.url, &self.tmp_dir)?;

        match expected.as_deref() {
            Some(_) => checksum::verify(&req.name, expected.as_deref(), &download.sha256)?,
            None => warn!(name = %req.name, "No checksum declared, skipping verification"),
        }

        // Decided before anything is written next to `dest`
        let kind = archive::detect(download.file.path())?;
        if kind == ArchiveKind::Unsupported {
            return Err(KilnError::UnsupportedArchive {
                path: PathBuf::from(&req.url),
            });
        }

        let staging = extract_staged(kind, download.file.path(), &dest, req)?;
        drop(download);
        commit(staging, &dest, existing)?;

        cache.add(req);
        cache.save()?;
        info!(name = %req.name, path = %dest.display(), "Installed");
        Ok(InstallOutcome::Installed(dest))
    }

    /// Install requests one after another, stopping at the first error.
    ///
    /// `report` sees every request's result as it completes.
    pub fn install_all<R>(
        &self,
        reqs: &[ArtifactRequest],
        cache: &mut ArtifactCache,
        mut report: R,
    ) -> KilnResult<Vec<(String, InstallOutcome)>>
    where
        R: FnMut(&ArtifactRequest, Result<&InstallOutcome, &KilnError>),
    {
        let mut outcomes = Vec::with_capacity(reqs.len());
        for req in reqs {
            debug!("Installing {} {}", req.name, req.version);
            match self.install(req, cache) {
                Ok(outcome) => {
                    report(req, Ok(&outcome));
                    outcomes.push((req.name.clone(), outcome));
                }
                Err(e) => {
                    report(req, Err(&e));
                    return Err(e);
                }
            }
        }
        Ok(outcomes)
    }
}

fn inspect_existing(
    dest: &Path,
    req: &ArtifactRequest,
    expected: Option<&str>,
) -> KilnResult<Existing> {
    let Ok(meta) = fs::symlink_metadata(dest) else {
        return Ok(Existing::Missing);
    };

    // Manual artifacts and single files can only be judged by existence
    if !req.is_downloadable() || !meta.is_dir() {
        debug!("Existing install at {} accepted", dest.display());
        return Ok(Existing::Complete);
    }

    let marker_path = dest.join(COMPLETE_MARKER);
    if marker_path.is_file() {
        let marker = fs::read_to_string(&marker_path)
            .ok()
            .and_then(|raw| serde_json::from_str::<CompletionMarker>(&raw).ok());
        return Ok(match marker {
            Some(marker) if marker.matches(req, expected) => Existing::Complete,
            _ => Existing::Stale,
        });
    }

    let mut entries = fs::read_dir(dest)
        .map_err(|e| KilnError::io(format!("reading {}", dest.display()), e))?;
    if entries.next().is_none() {
        Ok(Existing::Empty)
    } else {
        Ok(Existing::Foreign)
    }
}

fn sibling_dir(dest: &Path, prefix: &str) -> KilnResult<TempDir> {
    let parent = dest.parent().ok_or_else(|| KilnError::PathInvalid {
        spec: dest.display().to_string(),
        reason: "install directory has no parent".to_string(),
    })?;
    fs::create_dir_all(parent)
        .map_err(|e| KilnError::io(format!("creating {}", parent.display()), e))?;
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir_in(parent)
        .map_err(|e| {
            KilnError::io(format!("creating staging directory in {}", parent.display()), e)
        })
}

/// Extract and mark an install next to `dest`; dropped on failure
fn extract_staged(
    kind: ArchiveKind,
    archive: &Path,
    dest: &Path,
    req: &ArtifactRequest,
) -> KilnResult<TempDir> {
    let staging = sibling_dir(dest, STAGING_PREFIX)?;
    archive::extract(kind, archive, staging.path())?;
    write_marker(staging.path(), req)?;
    Ok(staging)
}

/// Move a finished staging directory to `dest`
fn commit(staging: TempDir, dest: &Path, existing: Existing) -> KilnResult<()> {
    let rename = |from: &Path, to: &Path| {
        fs::rename(from, to).map_err(|e| {
            KilnError::io(format!("moving {} to {}", from.display(), to.display()), e)
        })
    };

    match existing {
        Existing::Empty => fs::remove_dir(dest)
            .map_err(|e| KilnError::io(format!("removing {}", dest.display()), e))?,
        Existing::Stale => {
            // The old install is deleted with `retired` once the new one is in place
            let retired = sibling_dir(dest, RETIRED_PREFIX)?;
            let old = retired.path().join("install");
            rename(dest, &old)?;
            if let Err(e) = rename(staging.path(), dest) {
                if let Err(restore) = fs::rename(&old, dest) {
                    warn!(
                        path = %dest.display(),
                        error = %restore,
                        "Could not restore previous install"
                    );
                }
                return Err(e);
            }
            return Ok(());
        }
        // Complete and Foreign return from `install` before anything is staged
        _ => {}
    }
    rename(staging.path(), dest)
}

fn write_marker(dest: &Path, req: &ArtifactRequest) -> KilnResult<()> {
    let marker = CompletionMarker {
        name: req.name.clone(),
        version: req.version.clone(),
        checksum: req.checksum.clone(),
    };
    let path = dest.join(COMPLETE_MARKER);
    let content = serde_json::to_string_pretty(&marker)?;
    fs::write(&path, content).map_err(|e| KilnError::io(format!("writing {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::install::checksum::sha256_hex;
    use crate::install::testing::{tar_gz_bytes, zip_bytes, StaticFetcher};
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn root(&self) -> PathBuf {
            self.dir.path().join("sdks")
        }

        fn cache(&self) -> ArtifactCache {
            ArtifactCache::load(self.dir.path().join("artifacts.json")).unwrap()
        }

        fn installer(&self, fetcher: StaticFetcher) -> Installer<StaticFetcher> {
            Installer::new(PathResolver::new(self.root()), fetcher)
                .with_tmp_dir(self.dir.path().join("tmp"))
        }

        fn tmp_is_empty(&self) -> bool {
            let tmp = self.dir.path().join("tmp");
            !tmp.exists() || fs::read_dir(tmp).unwrap().count() == 0
        }
    }

    fn tool_zip() -> Vec<u8> {
        zip_bytes(&[("bin/tool", b"#!/bin/sh\necho tool\n")])
    }

    fn tool_request(body: &[u8]) -> ArtifactRequest {
        ArtifactRequest::new("tool", "1.0.0")
            .with_url("https://dl.example.com/tool-1.0.0.zip")
            .with_checksum(format!("sha256:{}", sha256_hex(body)))
            .with_install_path("sdks/tool")
    }

    #[test]
    fn installs_and_records() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let mut cache = fx.cache();
        let req = tool_request(&body);

        let outcome = installer.install(&req, &mut cache).unwrap();

        let dest = fx.root().join("tool");
        assert_eq!(outcome, InstallOutcome::Installed(dest.clone()));
        assert!(dest.join("bin/tool").is_file());
        assert!(dest.join(COMPLETE_MARKER).is_file());
        assert!(fx.cache().is_cached(&req));
        assert!(fx.tmp_is_empty());
    }

    #[test]
    fn second_install_makes_no_requests() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let req = tool_request(&body);

        let mut cache = fx.cache();
        installer.install(&req, &mut cache).unwrap();
        assert_eq!(installer.fetcher().calls(), 1);

        let mut reloaded = fx.cache();
        let outcome = installer.install(&req, &mut reloaded).unwrap();
        assert_eq!(outcome, InstallOutcome::AlreadyCached);
        assert_eq!(installer.fetcher().calls(), 1);
    }

    #[test]
    fn installs_tar_gz() {
        let fx = Fixture::new();
        let body = tar_gz_bytes(&[("jdk/bin/java", b"java")]);
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let req = ArtifactRequest::new("openjdk", "21")
            .with_url("https://dl.example.com/jdk.tar.gz")
            .with_checksum(sha256_hex(&body))
            .with_install_path("sdks/jdk-21");

        let mut cache = fx.cache();
        installer.install(&req, &mut cache).unwrap();
        assert!(fx.root().join("jdk-21/jdk/bin/java").is_file());
    }

    #[test]
    fn manual_install_required_without_url() {
        let fx = Fixture::new();
        let installer = fx.installer(StaticFetcher::new(vec![]));
        let dest = fx.dir.path().join("x");
        let req = ArtifactRequest::new("x", "1")
            .with_checksum("sha256:abc123")
            .with_install_path(dest.to_str().unwrap());

        let mut cache = fx.cache();
        let err = installer.install(&req, &mut cache).unwrap_err();

        assert!(matches!(err, KilnError::ManualInstallRequired { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(!dest.exists());
        assert!(!fx.dir.path().join("artifacts.json").exists());
        assert_eq!(installer.fetcher().calls(), 0);
    }

    #[test]
    fn checksum_mismatch_leaves_no_trace() {
        let fx = Fixture::new();
        let installer = fx.installer(StaticFetcher::new(tool_zip()));
        let dest = fx.dir.path().join("x");
        let req = ArtifactRequest::new("x", "1")
            .with_url("https://dl.example.com/x.zip")
            .with_checksum("sha256:abc123")
            .with_install_path(dest.to_str().unwrap());

        let mut cache = fx.cache();
        let err = installer.install(&req, &mut cache).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Integrity);
        assert!(!dest.exists());
        assert!(!cache.is_cached(&req));
        assert!(fx.tmp_is_empty());
    }

    #[test]
    fn http_error_is_network_kind() {
        let fx = Fixture::new();
        let installer = fx.installer(StaticFetcher::failing(404));
        let req = tool_request(b"irrelevant");

        let mut cache = fx.cache();
        let err = installer.install(&req, &mut cache).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.is_retryable());
        assert!(!fx.root().join("tool").exists());
    }

    #[test]
    fn adopts_manual_artifact_present_on_disk() {
        let fx = Fixture::new();
        let installer = fx.installer(StaticFetcher::new(vec![]));
        let dest = fx.root().join("xcode");
        fs::create_dir_all(&dest).unwrap();
        let req = ArtifactRequest::new("xcode", "15").with_install_path("sdks/xcode");

        let mut cache = fx.cache();
        let outcome = installer.install(&req, &mut cache).unwrap();

        assert_eq!(outcome, InstallOutcome::Adopted(dest));
        assert!(fx.cache().is_cached(&req));
        assert_eq!(installer.fetcher().calls(), 0);
    }

    #[test]
    fn adopts_marked_install_after_cache_loss() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let req = tool_request(&body);

        let mut cache = fx.cache();
        installer.install(&req, &mut cache).unwrap();
        fs::write(fx.dir.path().join("artifacts.json"), "garbage").unwrap();

        let mut corrupted = fx.cache();
        assert!(corrupted.is_empty());
        let outcome = installer.install(&req, &mut corrupted).unwrap();
        assert!(matches!(outcome, InstallOutcome::Adopted(_)));
        assert_eq!(installer.fetcher().calls(), 1);
    }

    #[test]
    fn unmarked_directory_is_never_replaced() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let req = tool_request(&body);

        let dest = fx.root().join("tool");
        fs::create_dir_all(dest.join("bin")).unwrap();
        fs::write(dest.join("bin/mine"), "x").unwrap();

        let mut cache = fx.cache();
        let err = installer.install(&req, &mut cache).unwrap_err();

        assert!(matches!(err, KilnError::DestinationOccupied { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(dest.join("bin/mine").is_file());
        assert_eq!(installer.fetcher().calls(), 0);
        assert!(!cache.is_cached(&req));
    }

    #[test]
    fn sdk_root_is_not_an_install_dir() {
        let fx = Fixture::new();
        let ndk = zip_bytes(&[("ndk-build", b"ndk")]);
        let installer = fx.installer(StaticFetcher::new(ndk.clone()));
        let ndk_req = ArtifactRequest::new("ndk", "r26")
            .with_url("https://dl.example.com/ndk.zip")
            .with_checksum(sha256_hex(&ndk))
            .with_install_path("sdks/ndk");
        let mut cache = fx.cache();
        installer.install(&ndk_req, &mut cache).unwrap();

        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        for spec in ["", "sdks/"] {
            let req = tool_request(&body).with_install_path(spec);
            let err = installer.install(&req, &mut cache).unwrap_err();
            assert!(matches!(err, KilnError::PathInvalid { .. }), "{spec:?}");
        }

        assert_eq!(installer.fetcher().calls(), 0);
        assert!(fx.root().join("ndk/ndk-build").is_file());
        assert!(cache.is_cached(&ndk_req));
    }

    #[test]
    fn installs_into_empty_directory() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let dest = fx.root().join("tool");
        fs::create_dir_all(&dest).unwrap();

        let mut cache = fx.cache();
        let outcome = installer.install(&tool_request(&body), &mut cache).unwrap();

        assert_eq!(outcome, InstallOutcome::Installed(dest.clone()));
        assert!(dest.join("bin/tool").is_file());
    }

    #[test]
    fn failed_extraction_leaves_nothing_behind() {
        let fx = Fixture::new();
        let body = b"PK\x03\x04truncated".to_vec();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let req = tool_request(&body);

        let mut cache = fx.cache();
        let err = installer.install(&req, &mut cache).unwrap_err();

        assert!(matches!(err, KilnError::Extract { .. }));
        assert_eq!(fs::read_dir(fx.root()).unwrap().count(), 0);
        assert!(!cache.is_cached(&req));
        assert!(fx.tmp_is_empty());
    }

    #[test]
    fn unsupported_archive_does_not_touch_dest() {
        let fx = Fixture::new();
        let body = b"not an archive".to_vec();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let req = tool_request(&body);

        let mut cache = fx.cache();
        let err = installer.install(&req, &mut cache).unwrap_err();
        assert!(matches!(err, KilnError::UnsupportedArchive { .. }));
        assert!(!fx.root().join("tool").exists());
        assert!(fx.tmp_is_empty());
    }

    #[test]
    fn checksum_change_reinstalls_marked_dir() {
        let fx = Fixture::new();
        let v1 = tool_zip();
        let installer = fx.installer(StaticFetcher::new(v1.clone()));
        let mut cache = fx.cache();
        installer.install(&tool_request(&v1), &mut cache).unwrap();

        let v2 = zip_bytes(&[("bin/tool", b"#!/bin/sh\necho v2\n")]);
        let installer = fx.installer(StaticFetcher::new(v2.clone()));
        let req = tool_request(&v2);

        let outcome = installer.install(&req, &mut cache).unwrap();

        let dest = fx.root().join("tool");
        assert_eq!(outcome, InstallOutcome::Installed(dest.clone()));
        assert_eq!(installer.fetcher().calls(), 1);
        assert_eq!(
            fs::read_to_string(dest.join("bin/tool")).unwrap(),
            "#!/bin/sh\necho v2\n"
        );
        assert!(fx.cache().is_cached(&req));

        let names: Vec<_> = fs::read_dir(fx.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, ["tool"]);
    }

    #[test]
    fn version_change_reinstalls_marked_dir() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let mut cache = fx.cache();
        installer.install(&tool_request(&body), &mut cache).unwrap();
        fs::remove_file(fx.dir.path().join("artifacts.json")).unwrap();

        let mut fresh = fx.cache();
        let bumped = ArtifactRequest {
            version: "1.0.1".to_string(),
            ..tool_request(&body)
        };
        let outcome = installer.install(&bumped, &mut fresh).unwrap();
        assert!(matches!(outcome, InstallOutcome::Installed(_)));
        assert_eq!(installer.fetcher().calls(), 2);
    }

    #[test]
    fn install_all_stops_at_first_error() {
        let fx = Fixture::new();
        let body = tool_zip();
        let installer = fx.installer(StaticFetcher::new(body.clone()));
        let reqs = vec![
            tool_request(&body),
            ArtifactRequest::new("manual", "1").with_install_path("sdks/manual"),
            tool_request(&body).with_install_path("sdks/never"),
        ];

        let mut cache = fx.cache();
        let mut seen = Vec::new();
        let err = installer
            .install_all(&reqs, &mut cache, |req, result| {
                seen.push((req.name.clone(), result.is_ok()))
            })
            .unwrap_err();

        assert!(matches!(err, KilnError::ManualInstallRequired { .. }));
        assert!(cache.get("tool").is_some());
        assert!(!fx.root().join("never").exists());
        assert_eq!(
            seen,
            [("tool".to_string(), true), ("manual".to_string(), false)]
        );
    }

    #[test]
    fn activation_hints() {
        let dir = Path::new("/opt/sdks/ndk");
        let hint = activation_hint("android-ndk-r26d", dir).unwrap();
        assert_eq!(hint.var, "ANDROID_NDK_HOME");
        assert_eq!(hint.export_line(), "export ANDROID_NDK_HOME=\"/opt/sdks/ndk\"");
        assert_eq!(activation_hint("OpenJDK-21", dir).unwrap().var, "JAVA_HOME");
        assert!(activation_hint("garble", dir).is_none());
    }
}
