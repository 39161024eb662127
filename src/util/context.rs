//! Global context for Lodestone operations.
//!
//! Provides centralized access to configuration, the manifest location,
//! and the persistent probe-cache path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::core::spec::find_manifest;
use crate::util::config::{global_config_path, load_config, project_config_path, Config};

/// File name of the persistent probe cache.
const CACHE_FILE: &str = "probe-cache.toml";

/// Shared state for one configuration session.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Merged global + project configuration.
    pub config: Config,

    /// Directory the session was started from.
    cwd: PathBuf,
}

impl GlobalContext {
    /// Create a context rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        Ok(Self::at(cwd))
    }

    /// Create a context rooted at an explicit directory.
    pub fn at(cwd: PathBuf) -> Self {
        let global = global_config_path();
        let config = load_config(global.as_deref(), &project_config_path(&cwd));
        GlobalContext { config, cwd }
    }

    /// Directory the session was started from.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Locate `Lodestone.toml` from the session directory upward.
    pub fn find_manifest(&self) -> Option<PathBuf> {
        find_manifest(&self.cwd)
    }

    /// Extra search prefixes from configuration.
    pub fn config_prefixes(&self) -> &[PathBuf] {
        &self.config.search.prefixes
    }

    /// Whether probe outcomes persist between sessions.
    pub fn cache_persists(&self) -> bool {
        self.config.cache.persist
    }

    /// Path of the persistent probe cache.
    ///
    /// A configured path wins; otherwise the platform cache directory is
    /// used (e.g. `~/.cache/lodestone/probe-cache.toml`).
    pub fn cache_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.config.cache.path {
            return Ok(path.clone());
        }

        let dirs = ProjectDirs::from("", "", "lodestone")
            .context("failed to determine platform cache directory")?;
        Ok(dirs.cache_dir().join(CACHE_FILE))
    }
}
