//! Error types for Kiln
//!
//! All modules use `KilnResult<T>` as their return type. Every variant maps
//! onto one of four [`ErrorKind`]s so callers can branch without matching
//! on message text.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Kiln operations
pub type KilnResult<T> = Result<T, KilnError>;

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: path specs, checksums, manifests, config files
    Configuration,
    /// Transport failures and non-2xx responses
    Network,
    /// Downloaded bytes did not match the declared checksum
    Integrity,
    /// Local disk failures: reads, writes, extraction, persistence
    Filesystem,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Configuration => "configuration",
            Self::Network => "network",
            Self::Integrity => "integrity",
            Self::Filesystem => "filesystem",
        };
        write!(f, "{}", name)
    }
}

/// All errors that can occur in Kiln
#[derive(Error, Debug)]
pub enum KilnError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid install path '{spec}': {reason}")]
    PathInvalid { spec: String, reason: String },

    #[error("Invalid checksum '{value}': {reason}")]
    ChecksumInvalid { value: String, reason: String },

    #[error("Invalid manifest {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Manual installation required for {name} at {path}")]
    ManualInstallRequired { name: String, path: PathBuf },

    #[error("Cannot install {name}: {path} already holds files kiln did not install")]
    DestinationOccupied { name: String, path: PathBuf },

    // Network errors
    #[error("Download failed for {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Download failed for {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    // Integrity errors
    #[error("Checksum mismatch for {name}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    // Filesystem errors
    #[error("Unsupported archive format for {path}")]
    UnsupportedArchive { path: PathBuf },

    #[error("Failed to extract {archive} into {dest}: {reason}")]
    Extract {
        archive: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Failed to persist cache {path}: {reason}")]
    CachePersist { path: PathBuf, reason: String },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("{0}")]
    User(String),
}

impl KilnError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a download error
    pub fn download(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an extraction error
    pub fn extract(
        archive: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Extract {
            archive: archive.into(),
            dest: dest.into(),
            reason: reason.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigInvalid { .. }
            | Self::PathInvalid { .. }
            | Self::ChecksumInvalid { .. }
            | Self::ManifestInvalid { .. }
            | Self::ManualInstallRequired { .. }
            | Self::DestinationOccupied { .. }
            | Self::TomlParse(_)
            | Self::TomlSerialize(_)
            | Self::User(_) => ErrorKind::Configuration,
            Self::Download { .. } | Self::HttpStatus { .. } => ErrorKind::Network,
            Self::ChecksumMismatch { .. } => ErrorKind::Integrity,
            Self::ConfigDirCreate { .. }
            | Self::UnsupportedArchive { .. }
            | Self::Extract { .. }
            | Self::CachePersist { .. }
            | Self::PathNotFound(_)
            | Self::Io { .. }
            | Self::Json(_) => ErrorKind::Filesystem,
        }
    }

    /// Check if re-running the same command may succeed without changing input
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Network | ErrorKind::Integrity)
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ManualInstallRequired { .. } => {
                Some("Download the artifact by hand and place it at the path shown")
            }
            Self::DestinationOccupied { .. } => {
                Some("Empty or move that directory, or set a different install_path")
            }
            Self::ChecksumMismatch { .. } => {
                Some("Re-run to retry the download, or update the checksum if the upstream file changed")
            }
            Self::HttpStatus { .. } | Self::Download { .. } => {
                Some("Check the URL and your network connection, then re-run")
            }
            Self::UnsupportedArchive { .. } => Some("Only .zip, .tar.gz and .xip archives are supported"),
            _ => None,
        }
    }
}
