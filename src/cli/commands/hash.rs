//! Hash command - print the content hash of a source tree

use crate::cache::content_hash_with;
use crate::cli::args::HashArgs;
use crate::config::Config;
use crate::error::KilnResult;

/// Execute the hash command
pub fn execute(args: HashArgs, config: &Config) -> KilnResult<()> {
    let hash = content_hash_with(&args.dir, &config.hash_policy())?;
    println!("{}", hash);
    Ok(())
}
