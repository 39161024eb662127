//! Probe result types and exported variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of a single dependency probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Whether the dependency satisfied its requirement.
    pub found: bool,

    /// Directory containing a matching header, if one was located.
    pub header_path: Option<PathBuf>,

    /// Full path of the matching binary artifact, if one was located.
    pub library_path: Option<PathBuf>,
}

impl ProbeResult {
    /// A not-found result with empty paths.
    pub fn not_found() -> Self {
        ProbeResult::default()
    }

    /// Export the conventional `<NAME>_*` variables downstream build
    /// targets consult.
    ///
    /// Variable names are derived by upper-casing the dependency name and
    /// replacing non-alphanumeric characters with underscores, so `libpng`
    /// exports `LIBPNG_FOUND`, `LIBPNG_INCLUDE_DIR`, `LIBPNG_LIBRARIES`.
    /// Path variables are only emitted for located artifacts.
    pub fn export_vars(&self, name: &str) -> Vec<(String, String)> {
        let prefix = var_prefix(name);
        let mut vars = Vec::new();

        vars.push((
            format!("{}_FOUND", prefix),
            if self.found { "1" } else { "0" }.to_string(),
        ));

        if let Some(ref dir) = self.header_path {
            vars.push((format!("{}_INCLUDE_DIR", prefix), dir.display().to_string()));
        }
        if let Some(ref file) = self.library_path {
            vars.push((format!("{}_LIBRARIES", prefix), file.display().to_string()));
        }

        vars
    }
}

/// Derive the exported-variable prefix from a dependency name.
pub fn var_prefix(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
