//! Streaming downloads
//!
//! The response body is streamed into a temp file while being hashed, so
//! each artifact is read from the network exactly once and never held in
//! memory. Non-2xx responses are hard failures; there is no retry.

use crate::error::{KilnError, KilnResult};
use crate::install::checksum::HashingWriter;
use crate::ui::transfer_bar;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Source of artifact bytes
pub trait Fetcher {
    /// Write the body at `url` into `sink`, returning the byte count
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> KilnResult<u64>;
}

/// HTTP(S) fetcher backed by a blocking `ureq` agent
pub struct HttpFetcher {
    agent: ureq::Agent,
    show_progress: bool,
}

impl HttpFetcher {
    /// Create a fetcher; `show_progress` draws a progress bar on stderr
    pub fn new(show_progress: bool) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self::with_config(config, show_progress)
    }

    fn with_config(config: ureq::config::Config, show_progress: bool) -> Self {
        Self {
            agent: ureq::Agent::new_with_config(config),
            show_progress,
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> KilnResult<u64> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| KilnError::download(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KilnError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let bar = transfer_bar(self.show_progress, total);
        let mut reader = bar.wrap_read(response.into_body().into_reader());
        let copied = io::copy(&mut reader, sink).map_err(|e| KilnError::download(url, e.to_string()));
        bar.finish_and_clear();
        copied
    }
}

/// A finished download: the temp file plus its digest
pub struct Download {
    /// Removed from disk when dropped
    pub file: NamedTempFile,
    pub sha256: String,
    pub size: u64,
}

/// Stream `url` into a fresh temp file inside `tmp_dir`, hashing on the way.
///
/// The temp file keeps the URL's archive suffix so suffix-based format
/// detection still works.
pub fn download_to_temp(fetcher: &dyn Fetcher, url: &str, tmp_dir: &Path) -> KilnResult<Download> {
    std::fs::create_dir_all(tmp_dir)
        .map_err(|e| KilnError::io(format!("creating {}", tmp_dir.display()), e))?;

    let file = tempfile::Builder::new()
        .prefix("kiln-download-")
        .suffix(archive_suffix(url))
        .tempfile_in(tmp_dir)
        .map_err(|e| KilnError::io("creating download temp file", e))?;

    let handle = file
        .reopen()
        .map_err(|e| KilnError::io("opening download temp file", e))?;
    let mut writer = HashingWriter::new(BufWriter::new(handle));
    let size = fetcher.fetch(url, &mut writer)?;
    writer
        .flush()
        .map_err(|e| KilnError::io("flushing download temp file", e))?;
    let (_, sha256) = writer.finish();

    debug!("Downloaded {} bytes from {} (sha256 {})", size, url, sha256);
    Ok(Download { file, sha256, size })
}

/// Archive suffix of the last URL path segment, ignoring query strings
fn archive_suffix(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    [".tar.gz", ".tgz", ".zip", ".xip"]
        .into_iter()
        .find(|suffix| name.to_ascii_lowercase().ends_with(suffix))
        .unwrap_or("")
}
