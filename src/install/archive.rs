//! Archive format detection and extraction
//!
//! The format is decided from magic bytes first, then from the file name
//! for formats without a usable signature (`.xip`). Detection is pure;
//! nothing touches the destination until the kind is known.

use crate::error::{KilnError, KilnResult};
use flate2::read::GzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Supported archive layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
    /// Apple signed archive, expanded with the system `xip` tool
    Xip,
    Unsupported,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
            Self::Xip => "xip",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{}", name)
    }
}

/// Classify an archive from its leading bytes and file name
pub fn sniff(header: &[u8], file_name: &str) -> ArchiveKind {
    if header.starts_with(&ZIP_MAGIC) {
        ArchiveKind::Zip
    } else if header.starts_with(&GZIP_MAGIC) {
        ArchiveKind::TarGz
    } else if file_name.to_ascii_lowercase().ends_with(".xip") {
        ArchiveKind::Xip
    } else {
        ArchiveKind::Unsupported
    }
}

/// Read the header of `path` and classify it
pub fn detect(path: &Path) -> KilnResult<ArchiveKind> {
    let mut header = [0u8; 4];
    let mut file =
        File::open(path).map_err(|e| KilnError::io(format!("opening {}", path.display()), e))?;
    let mut filled = 0;
    while filled < header.len() {
        let n = file
            .read(&mut header[filled..])
            .map_err(|e| KilnError::io(format!("reading {}", path.display()), e))?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(sniff(&header[..filled], &name))
}

/// Unpack `archive` into the existing directory `dest`
pub fn extract(kind: ArchiveKind, archive: &Path, dest: &Path) -> KilnResult<()> {
    debug!(
        "Extracting {} archive {} into {}",
        kind,
        archive.display(),
        dest.display()
    );
    match kind {
        ArchiveKind::Zip => extract_zip(archive, dest),
        ArchiveKind::TarGz => extract_tar_gz(archive, dest),
        ArchiveKind::Xip => extract_xip(archive, dest),
        ArchiveKind::Unsupported => Err(KilnError::UnsupportedArchive {
            path: archive.to_path_buf(),
        }),
    }
}

fn open(archive: &Path) -> KilnResult<File> {
    File::open(archive).map_err(|e| KilnError::io(format!("opening {}", archive.display()), e))
}

fn extract_zip(archive: &Path, dest: &Path) -> KilnResult<()> {
    let file = open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| KilnError::extract(archive, dest, e.to_string()))?;
    // Entries escaping `dest` are rejected by the zip crate
    zip.extract(dest)
        .map_err(|e| KilnError::extract(archive, dest, e.to_string()))
}

fn extract_tar_gz(archive: &Path, dest: &Path) -> KilnResult<()> {
    let file = open(archive)?;
    let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.set_preserve_permissions(true);
    tar.set_overwrite(true);
    // `unpack` skips entries with `..` or absolute paths
    tar.unpack(dest)
        .map_err(|e| KilnError::extract(archive, dest, e.to_string()))
}

#[cfg(target_os = "macos")]
fn extract_xip(archive: &Path, dest: &Path) -> KilnResult<()> {
    let status = std::process::Command::new("xip")
        .arg("--expand")
        .arg(archive)
        .current_dir(dest)
        .status()
        .map_err(|e| KilnError::io("running xip", e))?;
    if status.success() {
        Ok(())
    } else {
        Err(KilnError::extract(
            archive,
            dest,
            format!("xip exited with {}", status),
        ))
    }
}

#[cfg(not(target_os = "macos"))]
fn extract_xip(archive: &Path, _dest: &Path) -> KilnResult<()> {
    Err(KilnError::UnsupportedArchive {
        path: archive.to_path_buf(),
    })
}
