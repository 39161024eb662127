//! `lodestone cache` command
//!
//! Manage the persistent probe cache (outcomes carried between
//! configuration sessions).

use anyhow::{Context, Result};

use crate::cli::{CacheArgs, CacheCommands};
use lodestone::probe::{CachedOutcome, ProbeCache};
use lodestone::util::shell::{Shell, Status};
use lodestone::util::GlobalContext;

pub fn execute(args: CacheArgs, shell: &Shell) -> Result<()> {
    match args.command {
        CacheCommands::Show => show_cache(shell),
        CacheCommands::Path => show_path(shell),
        CacheCommands::Clear => clear_cache(shell),
    }
}

/// List cached probe outcomes.
fn show_cache(shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let path = ctx.cache_path()?;
    let cache = ProbeCache::load(&path)?;

    if cache.is_empty() {
        shell.print("probe cache is empty");
        return Ok(());
    }

    for (key, outcome) in cache.iter() {
        match outcome {
            CachedOutcome::Found {
                header_path,
                library_path,
            } => {
                let mut parts = Vec::new();
                if let Some(dir) = header_path {
                    parts.push(format!("headers {}", dir.display()));
                }
                if let Some(file) = library_path {
                    parts.push(format!("library {}", file.display()));
                }
                shell.print(format!("{}: found ({})", key, parts.join(", ")));
            }
            CachedOutcome::NotFound => {
                shell.print(format!("{}: not found", key));
            }
        }
    }

    Ok(())
}

/// Print the cache file location.
fn show_path(shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    shell.print(ctx.cache_path()?.display().to_string());
    Ok(())
}

/// Remove all cached probe outcomes.
fn clear_cache(shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let path = ctx.cache_path()?;

    if path.exists() {
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to remove probe cache: {}", path.display()))?;
        shell.status(Status::Cleared, path.display().to_string());
    } else {
        shell.status(Status::Skipped, "probe cache is already empty");
    }

    Ok(())
}
