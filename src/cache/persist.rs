//! JSON persistence shared by the artifact and build-state caches
//!
//! Loading is forgiving: a missing, empty or unparseable file yields the
//! default value so that a corrupted cache costs a redundant reinstall or
//! rebuild rather than a hard failure. Saving replaces the file atomically.

use crate::error::{KilnError, KilnResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Read `path` as JSON, falling back to `T::default()` when the file is
/// absent, empty or malformed. Other read failures are reported.
pub fn load_or_default<T>(path: &Path) -> KilnResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Cache file {} not found, starting empty", path.display());
            return Ok(T::default());
        }
        Err(e) => {
            return Err(KilnError::io(
                format!("reading cache file {}", path.display()),
                e,
            ))
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!("Cache file {} is empty", path.display());
        return Ok(T::default());
    }

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Cache file is corrupted, starting empty"
            );
            Ok(T::default())
        }
    }
}

/// Serialize `value` as indented JSON and atomically replace `path`.
///
/// The parent directory is created if needed. The data is written to a
/// sibling temp file which is renamed over the target, so readers see
/// either the old or the new content.
pub fn save_atomic<T: Serialize>(path: &Path, value: &T) -> KilnResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| persist_err(path, e))?;

    let content = serde_json::to_vec_pretty(value)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| persist_err(path, e))?;
    tmp.write_all(&content).map_err(|e| persist_err(path, e))?;
    tmp.write_all(b"\n").map_err(|e| persist_err(path, e))?;
    tmp.as_file().sync_all().map_err(|e| persist_err(path, e))?;
    tmp.persist(path).map_err(|e| persist_err(path, e.error))?;

    debug!("Saved cache file {}", path.display());
    Ok(())
}

fn persist_err(path: &Path, e: std::io::Error) -> KilnError {
    KilnError::CachePersist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
