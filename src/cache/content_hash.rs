//! Content hashing of source trees for rebuild decisions
//!
//! Modification times alone are unreliable across clones, checkouts and CI
//! cache restores, while hashing every byte of large binary assets on every
//! invocation is wasteful. The hash therefore folds in, for each tracked
//! file, its relative path and mtime, plus its full contents when the file
//! is smaller than [`HashPolicy::max_hashed_bytes`].

use crate::error::{KilnError, KilnResult};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs::File;
use std::io;
use std::path::{Component, Path};
use std::time::UNIX_EPOCH;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Files smaller than this have their contents hashed (1 MiB)
pub const DEFAULT_MAX_HASHED_BYTES: u64 = 1024 * 1024;

/// Generated and output directories that never affect a build
const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".idea",
    ".vscode",
    ".gradle",
    "build",
    "dist",
    "out",
    "target",
    "node_modules",
];

/// Source, module metadata and bundled asset extensions
const DEFAULT_EXTENSIONS: &[&str] = &[
    // source
    "go", "rs", "c", "h", "cc", "cpp", "hpp", "m", "mm", "swift", "java", "kt", "js", "ts",
    // module metadata
    "mod", "sum", "toml", "json", "yaml", "yml", "gradle", "xml", "plist",
    // assets
    "png", "svg", "ico", "icns", "ttf", "otf", "html", "css",
];

/// Which files participate in a content hash
#[derive(Debug, Clone)]
pub struct HashPolicy {
    skip_dirs: BTreeSet<String>,
    extensions: BTreeSet<String>,
    max_hashed_bytes: u64,
}

impl Default for HashPolicy {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_hashed_bytes: DEFAULT_MAX_HASHED_BYTES,
        }
    }
}

impl HashPolicy {
    /// Skip directories with this name at any depth
    pub fn skip_dir(mut self, name: impl Into<String>) -> Self {
        self.skip_dirs.insert(name.into());
        self
    }

    /// Track files with this extension (without the leading dot)
    pub fn track_extension(mut self, ext: &str) -> Self {
        self.extensions
            .insert(ext.trim_start_matches('.').to_ascii_lowercase());
        self
    }

    /// Change the content-hashing size ceiling
    pub fn with_max_hashed_bytes(mut self, bytes: u64) -> Self {
        self.max_hashed_bytes = bytes;
        self
    }

    pub fn max_hashed_bytes(&self) -> u64 {
        self.max_hashed_bytes
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.contains(name))
    }

    fn is_tracked_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }
}

/// Hash the tracked files under `source_dir` with the default policy
pub fn content_hash(source_dir: &Path) -> KilnResult<String> {
    content_hash_with(source_dir, &HashPolicy::default())
}

/// Hash the tracked files under `source_dir`.
///
/// Files are visited in sorted path order so the result only depends on
/// the tree itself.
pub fn content_hash_with(source_dir: &Path, policy: &HashPolicy) -> KilnResult<String> {
    if !source_dir.is_dir() {
        return Err(KilnError::PathNotFound(source_dir.to_path_buf()));
    }

    let mut hasher = Sha256::new();
    let mut tracked = 0usize;

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !policy.is_skipped_dir(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let context = format!("walking {}", source_dir.display());
            match e.into_io_error() {
                Some(io) => KilnError::io(context, io),
                None => KilnError::io(context, io::Error::other("filesystem loop")),
            }
        })?;

        if !entry.file_type().is_file() || !policy.is_tracked_file(entry.path()) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(source_dir)
            .unwrap_or_else(|_| entry.path());
        let metadata = entry.metadata().map_err(|e| {
            KilnError::io(
                format!("reading metadata of {}", entry.path().display()),
                io::Error::other(e),
            )
        })?;

        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or(0);

        hasher.update(portable_path(rel).as_bytes());
        hasher.update(b"\0");
        hasher.update(mtime.to_string().as_bytes());
        hasher.update(b"\0");

        if metadata.len() < policy.max_hashed_bytes {
            let mut file = File::open(entry.path())
                .map_err(|e| KilnError::io(format!("opening {}", entry.path().display()), e))?;
            io::copy(&mut file, &mut hasher)
                .map_err(|e| KilnError::io(format!("hashing {}", entry.path().display()), e))?;
        }
        hasher.update(b"\n");
        tracked += 1;
    }

    let hash = hex::encode(hasher.finalize());
    debug!(
        "Content hash of {} over {} files: {}",
        source_dir.display(),
        tracked,
        &hash[..12]
    );
    Ok(hash)
}

/// Relative path with `/` separators regardless of platform
fn portable_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
