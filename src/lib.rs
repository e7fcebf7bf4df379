//! Kiln - idempotent SDK installs and rebuild checks
//!
//! Two persisted caches drive everything:
//!
//! - [`cache::ArtifactCache`] records which SDKs, toolchains and images were
//!   downloaded, verified and unpacked where. [`install::Installer`] consults
//!   it so an artifact is fetched at most once per checksum and path.
//! - [`cache::BuildStateCache`] records a content hash of each build's
//!   sources so unchanged builds are skipped.
//!
//! Both are plain values owned by the caller; nothing is global.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod install;
pub mod manifest;
pub mod paths;
pub mod ui;

pub use error::{ErrorKind, KilnError, KilnResult};
