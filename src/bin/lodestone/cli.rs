//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use lodestone::core::request::Requirement;

/// Lodestone - a locator for native C/C++ library dependencies
#[derive(Parser)]
#[command(name = "lodestone")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the dependencies declared in Lodestone.toml
    Check(CheckArgs),

    /// Probe a single dependency described on the command line
    Locate(LocateArgs),

    /// Manage the persistent probe cache
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Specific dependencies to probe (defaults to all declared)
    pub names: Vec<String>,

    /// Path to the manifest (defaults to Lodestone.toml found upward)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Emit a machine-readable JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Print `<NAME>_FOUND` / `<NAME>_INCLUDE_DIR` / `<NAME>_LIBRARIES`
    /// variables to stdout
    #[arg(long, conflicts_with = "json")]
    pub export: bool,

    /// Ignore and do not update the persistent probe cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args)]
pub struct LocateArgs {
    /// Dependency name (used for the cache key and exported variables)
    pub name: String,

    /// Candidate header file name (repeatable, priority order)
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Candidate library name or glob pattern (repeatable, priority order)
    #[arg(long = "library")]
    pub libraries: Vec<String>,

    /// Explicit header directory to search (replaces derived candidates)
    #[arg(long = "header-dir")]
    pub header_dirs: Vec<PathBuf>,

    /// Explicit library directory to search (replaces derived candidates)
    #[arg(long = "library-dir")]
    pub library_dirs: Vec<PathBuf>,

    /// Install prefix hint (repeatable, searched first)
    #[arg(long)]
    pub prefix: Vec<PathBuf>,

    /// Which artifacts must be located: header, library, or both
    #[arg(long, default_value = "both")]
    pub requires: Requirement,

    /// Treat absence as a fatal error
    #[arg(long)]
    pub required: bool,

    /// Emit a machine-readable JSON report to stdout
    #[arg(long)]
    pub json: bool,

    /// Print exported variables to stdout
    #[arg(long, conflicts_with = "json")]
    pub export: bool,

    /// Ignore and do not update the persistent probe cache
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached probe outcomes
    Show,

    /// Print the cache file location
    Path,

    /// Remove all cached probe outcomes
    Clear,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
