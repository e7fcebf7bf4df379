//! Resolve command - print the absolute path for a path specification

use crate::cli::args::ResolveArgs;
use crate::config::Config;
use crate::error::KilnResult;
use crate::paths::PathResolver;

/// Execute the resolve command
pub fn execute(args: ResolveArgs, config: &Config) -> KilnResult<()> {
    let resolver = PathResolver::new(config.sdk_root());
    let path = resolver.resolve(&args.spec)?;
    println!("{}", path.display());
    Ok(())
}
