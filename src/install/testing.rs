//! In-memory fetchers and archive builders for tests

use crate::error::{KilnError, KilnResult};
use crate::install::download::Fetcher;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::cell::Cell;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Serves a fixed body (or a fixed HTTP status) and counts requests
pub struct StaticFetcher {
    body: Vec<u8>,
    status: Option<u16>,
    calls: Cell<usize>,
}

impl StaticFetcher {
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            status: None,
            calls: Cell::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            body: vec![],
            status: Some(status),
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> KilnResult<u64> {
        self.calls.set(self.calls.get() + 1);
        if let Some(status) = self.status {
            return Err(KilnError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        sink.write_all(&self.body)
            .map_err(|e| KilnError::download(url, e.to_string()))?;
        Ok(self.body.len() as u64)
    }
}

/// Build a zip archive holding `files`
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Build a gzip-compressed tar archive holding `files`
pub fn tar_gz_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *data).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}
