//! `lodestone locate` command
//!
//! Probes a single dependency described entirely on the command line,
//! without requiring a manifest. Useful for one-off checks and scripting.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::LocateArgs;
use lodestone::core::spec::DependencySpec;
use lodestone::probe::{ProbeCache, Prober};
use lodestone::util::shell::{Shell, Status};
use lodestone::util::GlobalContext;

#[derive(Debug, Serialize)]
struct LocateReport {
    name: String,
    found: bool,
    header_path: Option<PathBuf>,
    library_path: Option<PathBuf>,
}

pub fn execute(args: LocateArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let spec = DependencySpec {
        headers: args.headers.clone(),
        libraries: args.libraries.clone(),
        requires: args.requires,
        required: args.required,
        prefixes: args.prefix.clone(),
        ..Default::default()
    };

    let mut request = spec.to_request(&args.name, ctx.config_prefixes());

    // Explicit directories replace the derived candidates outright.
    if !args.header_dirs.is_empty() {
        request.header_dirs = args.header_dirs.clone();
    }
    if !args.library_dirs.is_empty() {
        request.library_dirs = args.library_dirs.clone();
    }

    let persist = !args.no_cache && ctx.cache_persists();
    let cache_path = if persist {
        Some(ctx.cache_path()?)
    } else {
        None
    };
    let mut cache = match cache_path {
        Some(ref path) => ProbeCache::load(path)?,
        None => ProbeCache::new(),
    };

    let was_cached = cache.is_probed(&args.name);
    let result = match Prober::real().probe(&args.name, &request, &mut cache) {
        Ok(result) => result,
        Err(err) => {
            if let Some(ref path) = cache_path {
                let _ = cache.save(path);
            }
            return Err(anyhow::anyhow!(
                "{}\n{}\nhelp: set {} to the install prefix of `{}`",
                err,
                err.searched_summary(),
                err.env_hint,
                err.name
            ));
        }
    };

    if let Some(ref path) = cache_path {
        cache
            .save(path)
            .with_context(|| format!("failed to persist probe cache: {}", path.display()))?;
    }

    if result.found {
        let status = if was_cached {
            Status::Cached
        } else {
            Status::Found
        };
        shell.status(status, &args.name);
    } else {
        shell.status(Status::Missing, format!("{} (optional)", args.name));
    }

    if args.export {
        for (key, value) in result.export_vars(&args.name) {
            shell.print(format!("{}={}", key, value));
        }
    }

    if shell.is_json() {
        let report = LocateReport {
            name: args.name.clone(),
            found: result.found,
            header_path: result.header_path.clone(),
            library_path: result.library_path.clone(),
        };
        shell.print(serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
