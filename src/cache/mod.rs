//! Persistent, checksum-driven caches
//!
//! Two ledgers share one idempotency contract: record what was done, keyed
//! by the content that produced it, so a repeated command with unchanged
//! inputs does nothing.
//!
//! | Cache | Key | Hit when |
//! |-------|-----|----------|
//! | [`ArtifactCache`] | artifact name | checksum and install path unchanged |
//! | [`BuildStateCache`] | `project:platform` | output present, last build ok, source hash unchanged |
//!
//! Neither cache expires entries. Both tolerate a missing or corrupted file
//! by starting empty. There is no cross-process locking: run one
//! invocation at a time against a given cache file.

pub mod adapters;
pub mod artifact;
pub mod build_state;
pub mod content_hash;
pub mod persist;

pub use adapters::{ToolCache, VmImageCache, GO_INSTALL_SENTINEL};
pub use artifact::{ArtifactCache, ArtifactRequest, CacheEntry};
pub use build_state::{BuildState, BuildStateCache, RebuildReason};
pub use content_hash::{content_hash, content_hash_with, HashPolicy};
