//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kiln - idempotent SDK installs and rebuild checks
///
/// Downloads, verifies and unpacks build toolchains once, and decides
/// whether a build output is stale from the content of its sources.
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "KILN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install artifacts from a manifest or a single request
    Install(InstallArgs),

    /// Inspect and manage the artifact cache
    Cache(CacheArgs),

    /// Check or record build state
    Build(BuildArgs),

    /// Print the content hash of a source tree
    Hash(HashArgs),

    /// Resolve an install path specification
    Resolve(ResolveArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Manifest listing artifacts to install
    #[arg(short = 'f', long, conflicts_with_all = ["name", "version", "url", "checksum", "path"])]
    pub manifest: Option<PathBuf>,

    /// Artifact name
    #[arg(long, requires = "version", required_unless_present = "manifest")]
    pub name: Option<String>,

    /// Artifact version
    #[arg(long, requires = "name")]
    pub version: Option<String>,

    /// Download URL (omit for artifacts installed by hand)
    #[arg(long, requires = "name")]
    pub url: Option<String>,

    /// Expected SHA-256, with or without a `sha256:` prefix
    #[arg(long, requires = "name")]
    pub checksum: Option<String>,

    /// Install path specification (defaults to sdks/<name>)
    #[arg(short, long, requires = "name")]
    pub path: Option<String>,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached artifacts
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Forget one artifact (files on disk are kept)
    Remove {
        /// Artifact name
        name: String,
    },

    /// Forget every artifact and build state
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Print cache file locations
    Path,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Subcommand for build
    #[command(subcommand)]
    pub action: BuildAction,
}

/// Identifies one build output
#[derive(Parser, Debug, Clone)]
pub struct BuildTarget {
    /// Project name
    #[arg(long)]
    pub project: String,

    /// Target platform
    #[arg(long)]
    pub platform: String,

    /// Source directory to hash
    #[arg(long)]
    pub source: PathBuf,

    /// Build output path
    #[arg(long)]
    pub output: PathBuf,
}

/// Build subcommands
#[derive(Subcommand, Debug)]
pub enum BuildAction {
    /// Report whether a rebuild is needed
    Check {
        #[command(flatten)]
        target: BuildTarget,

        /// Exit with status 1 when a rebuild is needed
        #[arg(long)]
        exit_code: bool,
    },

    /// Record the result of a build attempt
    Record {
        #[command(flatten)]
        target: BuildTarget,

        /// Mark the build as failed
        #[arg(long)]
        failed: bool,
    },

    /// Forget the recorded state of a build
    Forget {
        /// Project name
        #[arg(long)]
        project: String,

        /// Target platform
        #[arg(long)]
        platform: String,
    },

    /// List recorded builds
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Arguments for the hash command
#[derive(Parser, Debug)]
pub struct HashArgs {
    /// Source directory
    pub dir: PathBuf,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path specification (absolute, `sdks/...`, relative, `$VAR/...`)
    #[arg(default_value = "")]
    pub spec: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
