//! `lodestone check` command
//!
//! Probes every dependency declared in `Lodestone.toml` (or a selected
//! subset), reports the outcome per dependency, and exits non-zero if a
//! required dependency is absent.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::CheckArgs;
use lodestone::core::result::ProbeResult;
use lodestone::core::spec::{DependencySpec, Manifest, MANIFEST_NAME};
use lodestone::probe::{ProbeCache, Prober};
use lodestone::util::diagnostic::{self, suggestions, Diagnostic, MissingDependencyError};
use lodestone::util::shell::{Shell, Status};
use lodestone::util::GlobalContext;

/// One dependency's outcome in the JSON report.
#[derive(Debug, Serialize)]
struct DependencyReport {
    name: String,
    found: bool,
    cached: bool,
    required: bool,
    header_path: Option<PathBuf>,
    library_path: Option<PathBuf>,
}

pub fn execute(args: CheckArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let manifest_path = match args.manifest.clone().or_else(|| ctx.find_manifest()) {
        Some(path) => path,
        None => bail!(
            "no {} found in this directory or any parent\n{}",
            MANIFEST_NAME,
            suggestions::NO_MANIFEST
        ),
    };
    let manifest = Manifest::load(&manifest_path)?;

    let selected = select_dependencies(&manifest, &args.names)?;

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

    let prober = Prober::real();
    let mut reports = Vec::new();

    for (name, spec) in selected {
        let request = spec.to_request(name, ctx.config_prefixes());
        let was_cached = cache.is_probed(name);

        let result = match prober.probe(name, &request, &mut cache) {
            Ok(result) => result,
            Err(err) => {
                // Record what was learned before aborting.
                if let Some(ref path) = cache_path {
                    let _ = cache.save(path);
                }
                return Err(fatal_missing(err));
            }
        };

        report_status(shell, name, &result, was_cached);
        reports.push(DependencyReport {
            name: name.to_string(),
            found: result.found,
            cached: was_cached,
            required: spec.required,
            header_path: result.header_path.clone(),
            library_path: result.library_path.clone(),
        });

        if args.export {
            for (key, value) in result.export_vars(name) {
                shell.print(format!("{}={}", key, value));
            }
        }
    }

    if let Some(ref path) = cache_path {
        cache
            .save(path)
            .with_context(|| format!("failed to persist probe cache: {}", path.display()))?;
    }

    if shell.is_json() {
        shell.print(serde_json::to_string_pretty(&reports)?);
    }

    Ok(())
}

/// Resolve the requested names against the manifest, defaulting to all
/// declared dependencies.
fn select_dependencies<'m>(
    manifest: &'m Manifest,
    names: &'m [String],
) -> Result<Vec<(&'m str, &'m DependencySpec)>> {
    if names.is_empty() {
        return Ok(manifest
            .dependencies
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
            .collect());
    }

    names
        .iter()
        .map(|name| match manifest.get(name) {
            Some(spec) => Ok((name.as_str(), spec)),
            None => bail!(
                "dependency `{}` is not declared in the manifest\n{}",
                name,
                suggestions::UNKNOWN_DEPENDENCY
            ),
        })
        .collect()
}

/// Print the per-dependency status line, plus a diagnostic for optional
/// misses.
fn report_status(shell: &Shell, name: &str, result: &ProbeResult, was_cached: bool) {
    if result.found {
        let status = if was_cached {
            Status::Cached
        } else {
            Status::Found
        };
        shell.status(status, format!("{} ({})", name, describe(result)));
        return;
    }

    shell.status(Status::Missing, format!("{} (optional)", name));
    if !shell.is_json() {
        let env_hint = format!("{}_ROOT", lodestone::core::result::var_prefix(name));
        let diag = Diagnostic::warning(format!("optional dependency `{}` was not found", name))
            .with_suggestion(format!("Install `{}` development files", name))
            .with_suggestion(format!("Set {} to a custom install prefix", env_hint));
        diagnostic::emit(&diag, shell.color_enabled());
    }
}

fn describe(result: &ProbeResult) -> String {
    match (&result.header_path, &result.library_path) {
        (Some(h), Some(l)) => format!("headers {}, library {}", h.display(), l.display()),
        (Some(h), None) => format!("headers {}", h.display()),
        (None, Some(l)) => format!("library {}", l.display()),
        (None, None) => "no paths recorded".to_string(),
    }
}

/// Build the process-terminating error for a required miss.
fn fatal_missing(err: MissingDependencyError) -> anyhow::Error {
    anyhow::anyhow!(
        "{}\n{}\nhelp: set {} to the install prefix of `{}`",
        err,
        err.searched_summary(),
        err.env_hint,
        err.name
    )
}
