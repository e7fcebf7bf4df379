//! CLI command implementations

pub mod build;
pub mod cache;
pub mod config;
pub mod hash;
pub mod install;
pub mod resolve;

pub use build::execute as build;
pub use cache::execute as cache;
pub use config::execute as config;
pub use hash::execute as hash;
pub use install::execute as install;
pub use resolve::execute as resolve;
