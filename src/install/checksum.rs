//! SHA-256 checksum parsing and single-pass hashing

use crate::error::{KilnError, KilnResult};
use sha2::{Digest, Sha256};
use std::io::{self, Write};

const SHA256_PREFIX: &str = "sha256:";

/// Parse a declared checksum into lowercase hex.
///
/// Accepts `sha256:<hex>` or bare `<hex>`. Returns `None` for an empty
/// value, which disables verification.
pub fn parse_expected(raw: &str) -> KilnResult<Option<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let hex_part = match trimmed.get(..SHA256_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SHA256_PREFIX) => &trimmed[SHA256_PREFIX.len()..],
        _ => trimmed,
    };

    if let Some((algo, _)) = hex_part.split_once(':') {
        return Err(KilnError::ChecksumInvalid {
            value: raw.to_string(),
            reason: format!("unsupported algorithm '{}', only sha256 is supported", algo),
        });
    }

    if hex_part.is_empty() || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(KilnError::ChecksumInvalid {
            value: raw.to_string(),
            reason: "expected a hex digest".to_string(),
        });
    }

    Ok(Some(hex_part.to_ascii_lowercase()))
}

/// Compare a computed digest against the declared one
pub fn verify(name: &str, expected: Option<&str>, actual: &str) -> KilnResult<()> {
    match expected {
        Some(expected) if !expected.eq_ignore_ascii_case(actual) => {
            Err(KilnError::ChecksumMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Hex SHA-256 of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Writer that hashes everything passing through it
pub struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
    written: u64,
}

impl<W: Write> HashingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            written: 0,
        }
    }

    /// Bytes written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Consume the writer, returning the inner writer and the hex digest
    pub fn finish(self) -> (W, String) {
        (self.inner, hex::encode(self.hasher.finalize()))
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
