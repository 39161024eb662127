//! Dependency probing.
//!
//! A probe answers one question: is a named third-party dependency present
//! on this host, and where? Candidate directories are searched in declared
//! order, names in declared order within each directory, and the first
//! match wins. Outcomes are recorded in a [`ProbeCache`] so a key is probed
//! at most once per session.

pub mod cache;
pub mod fsx;

use std::path::PathBuf;

use glob::Pattern;

use crate::core::request::ProbeRequest;
use crate::core::result::{var_prefix, ProbeResult};
use crate::util::diagnostic::MissingDependencyError;

pub use cache::{CachedOutcome, ProbeCache};
pub use fsx::{FileSystem, RealFileSystem};

static REAL_FS: RealFileSystem = RealFileSystem;

/// Performs dependency probes against a filesystem.
pub struct Prober<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> Prober<'a> {
    /// Create a prober over the given filesystem.
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Prober { fs }
    }

    /// Create a prober over the real filesystem.
    pub fn real() -> Prober<'static> {
        Prober { fs: &REAL_FS }
    }

    /// Resolve whether the dependency identified by `cache_key` is present.
    ///
    /// A key that was already probed this session is answered from the
    /// cache without touching the filesystem, even if the filesystem has
    /// changed since. A missing dependency with `required = true` is a
    /// fatal error; this applies to cached not-found outcomes as well, so
    /// repeated required probes fail consistently.
    pub fn probe(
        &self,
        cache_key: &str,
        request: &ProbeRequest,
        cache: &mut ProbeCache,
    ) -> Result<ProbeResult, MissingDependencyError> {
        if let Some(outcome) = cache.get(cache_key) {
            tracing::debug!("{}: using cached outcome", cache_key);
            let result = outcome.to_result();
            if !result.found && request.required {
                return Err(self.missing(cache_key, request));
            }
            return Ok(result);
        }

        let header_path = self.locate_header(cache_key, request);
        let library_path = self.locate_library(cache_key, request);

        let header_ok = !request.requires.needs_header() || header_path.is_some();
        let library_ok = !request.requires.needs_library() || library_path.is_some();
        let found = header_ok && library_ok;

        let result = ProbeResult {
            found,
            header_path,
            library_path,
        };

        cache.insert(cache_key, CachedOutcome::from_result(&result));

        if !found {
            if request.required {
                return Err(self.missing(cache_key, request));
            }
            tracing::debug!("{}: not found (optional)", cache_key);
            return Ok(ProbeResult::not_found());
        }

        if !request.quiet {
            tracing::info!(
                "found {}: headers {}, library {}",
                cache_key,
                display_opt(&result.header_path),
                display_opt(&result.library_path),
            );
        }

        Ok(result)
    }

    /// Locate the header directory, honoring a trusted override.
    fn locate_header(&self, key: &str, request: &ProbeRequest) -> Option<PathBuf> {
        if let Some(ref dir) = request.overrides.header_dir {
            tracing::debug!("{}: header dir pinned to {}", key, dir.display());
            return Some(dir.clone());
        }

        if request.header_names.is_empty() {
            return None;
        }

        for dir in &request.header_dirs {
            for name in &request.header_names {
                if self.fs.file_exists(&dir.join(name)) {
                    tracing::debug!("{}: header {} in {}", key, name, dir.display());
                    return Some(dir.clone());
                }
            }
        }
        None
    }

    /// Locate the binary artifact, honoring a trusted override. Names may
    /// be glob patterns; within one pattern in one directory the
    /// lexicographically smallest match wins.
    fn locate_library(&self, key: &str, request: &ProbeRequest) -> Option<PathBuf> {
        if let Some(ref file) = request.overrides.library_file {
            tracing::debug!("{}: library pinned to {}", key, file.display());
            return Some(file.clone());
        }

        if request.library_names.is_empty() {
            return None;
        }

        for dir in &request.library_dirs {
            for name in &request.library_names {
                if is_pattern(name) {
                    if let Some(file) = self.match_pattern(dir, name) {
                        tracing::debug!("{}: library {}", key, file.display());
                        return Some(file);
                    }
                } else if self.fs.file_exists(&dir.join(name)) {
                    tracing::debug!("{}: library {}", key, dir.join(name).display());
                    return Some(dir.join(name));
                }
            }
        }
        None
    }

    /// Match a glob pattern against one directory's entries.
    fn match_pattern(&self, dir: &std::path::Path, pattern: &str) -> Option<PathBuf> {
        let pattern = match Pattern::new(pattern) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("invalid library pattern `{}`: {}", pattern, e);
                return None;
            }
        };

        let mut matches: Vec<String> = self
            .fs
            .list_dir(dir)
            .into_iter()
            .filter(|name| pattern.matches(name))
            .collect();
        matches.sort();

        matches.into_iter().next().map(|name| dir.join(name))
    }

    fn missing(&self, key: &str, request: &ProbeRequest) -> MissingDependencyError {
        let mut searched = request.header_dirs.clone();
        searched.extend(request.library_dirs.iter().cloned());

        MissingDependencyError {
            name: key.to_string(),
            env_hint: format!("{}_ROOT", var_prefix(key)),
            searched,
        }
    }
}

fn is_pattern(name: &str) -> bool {
    name.contains(['*', '?', '['])
}

fn display_opt(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "(none)".to_string(),
    }
}
