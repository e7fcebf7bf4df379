//! Install-path resolution
//!
//! Turns the logical install path written in a manifest (`sdks/android-ndk`,
//! `$HOME/tools/jdk`, `/opt/sdk`, or nothing at all) into an absolute
//! filesystem path. Pure path arithmetic: nothing is created or checked on
//! disk.

use crate::error::{KilnError, KilnResult};
use std::path::{Path, PathBuf};

/// Prefix that anchors an install path inside the SDK root
pub const SDK_PREFIX: &str = "sdks/";

/// Resolves install-path specifications against an SDK root
#[derive(Debug, Clone)]
pub struct PathResolver {
    sdk_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver anchored at `sdk_root`
    pub fn new(sdk_root: impl Into<PathBuf>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
        }
    }

    /// The SDK root this resolver was created with
    pub fn sdk_root(&self) -> &Path {
        &self.sdk_root
    }

    /// Resolve a path specification to an absolute path.
    ///
    /// Rules, first match wins:
    /// 1. empty spec: the SDK root
    /// 2. `$VAR` / `${VAR}` references are expanded
    /// 3. absolute paths are returned as-is
    /// 4. `sdks/<rest>` resolves to `<sdk root>/<rest>`
    /// 5. anything else is relative to the current directory
    pub fn resolve(&self, spec: &str) -> KilnResult<PathBuf> {
        if spec.contains('\0') {
            return Err(KilnError::PathInvalid {
                spec: spec.to_string(),
                reason: "contains a NUL byte".to_string(),
            });
        }

        if spec.is_empty() {
            return absolutize(spec, &self.sdk_root);
        }

        let expanded = expand_env(spec, |name| std::env::var(name).ok());
        if expanded.is_empty() {
            return Err(KilnError::PathInvalid {
                spec: spec.to_string(),
                reason: "expands to an empty path".to_string(),
            });
        }

        let path = Path::new(&expanded);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        if let Some(rest) = expanded.strip_prefix(SDK_PREFIX) {
            return absolutize(spec, &self.sdk_root.join(rest));
        }

        absolutize(spec, path)
    }
}

fn absolutize(spec: &str, path: &Path) -> KilnResult<PathBuf> {
    std::path::absolute(path).map_err(|e| KilnError::PathInvalid {
        spec: spec.to_string(),
        reason: e.to_string(),
    })
}

/// Expand `$NAME` and `${NAME}` references using `lookup`.
///
/// Unknown variables expand to the empty string. A `$` not followed by a
/// name is kept literally.
pub fn expand_env<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                    rest = &braced[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
            continue;
        }

        let name_len = after
            .find(|c: char| !is_name_char(c))
            .unwrap_or(after.len());
        if name_len == 0 {
            out.push('$');
        } else {
            out.push_str(&lookup(&after[..name_len]).unwrap_or_default());
        }
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
