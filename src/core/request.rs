//! Probe request types.
//!
//! A [`ProbeRequest`] describes everything a single dependency probe needs:
//! ordered candidate names and directories for the header and the binary
//! artifact, which of the two artifacts the dependency actually requires,
//! and any caller-supplied overrides that bypass the search.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which artifacts a dependency must provide to count as found.
///
/// Find-module conventions vary: some dependencies are header-only, some
/// ship only a binary, most need both. The combination rule is an explicit
/// per-request choice rather than something inferred from the candidate
/// lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    /// Only a header directory must be located.
    Header,
    /// Only a binary artifact must be located.
    Library,
    /// Both a header directory and a binary artifact must be located.
    #[default]
    Both,
}

impl Requirement {
    /// Whether the header search contributes to the found decision.
    pub fn needs_header(self) -> bool {
        matches!(self, Requirement::Header | Requirement::Both)
    }

    /// Whether the library search contributes to the found decision.
    pub fn needs_library(self) -> bool {
        matches!(self, Requirement::Library | Requirement::Both)
    }
}

impl std::str::FromStr for Requirement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "header" => Ok(Requirement::Header),
            "library" => Ok(Requirement::Library),
            "both" => Ok(Requirement::Both),
            _ => Err(format!(
                "invalid requirement '{}'; expected 'header', 'library', or 'both'",
                s
            )),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Header => write!(f, "header"),
            Requirement::Library => write!(f, "library"),
            Requirement::Both => write!(f, "both"),
        }
    }
}

/// Caller-supplied paths that are trusted as-is.
///
/// An override short-circuits the corresponding artifact's search entirely:
/// no candidate list is consulted and no existence check is performed. This
/// mirrors the `<NAME>_INCLUDE_DIR` / `<NAME>_LIBRARY` cache-variable
/// convention where a user-pinned path wins unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOverride {
    /// Directory containing the dependency's headers.
    pub header_dir: Option<PathBuf>,

    /// Full path to the dependency's binary artifact.
    pub library_file: Option<PathBuf>,
}

impl ProbeOverride {
    /// True if neither artifact is overridden.
    pub fn is_empty(&self) -> bool {
        self.header_dir.is_none() && self.library_file.is_none()
    }
}

/// Input to a single dependency probe.
///
/// Candidate lists are ordered: directories are searched in declared order
/// and, within each directory, names in declared order. The first match
/// wins, so callers express priority (e.g. a vendored copy over the system
/// copy) purely by ordering.
#[derive(Debug, Clone, Default)]
pub struct ProbeRequest {
    /// Header file names to look for (e.g. `zlib.h`).
    pub header_names: Vec<String>,

    /// Directories to search for headers, in priority order.
    pub header_dirs: Vec<PathBuf>,

    /// Binary artifact names, possibly glob patterns (e.g. `libz.so*`).
    pub library_names: Vec<String>,

    /// Directories to search for the binary artifact, in priority order.
    pub library_dirs: Vec<PathBuf>,

    /// Which artifacts must be located for the dependency to count as found.
    pub requires: Requirement,

    /// If true, absence of the dependency is fatal to the caller.
    pub required: bool,

    /// Suppress the informational success message.
    pub quiet: bool,

    /// Trusted paths that bypass the search.
    pub overrides: ProbeOverride,
}

impl ProbeRequest {
    /// Create an empty request with default policy (`both`, optional, loud).
    pub fn new() -> Self {
        ProbeRequest::default()
    }

    /// Set the candidate header names.
    pub fn with_header_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the candidate header directories.
    pub fn with_header_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.header_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the candidate library names.
    pub fn with_library_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.library_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the candidate library directories.
    pub fn with_library_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.library_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Set which artifacts are mandatory.
    pub fn with_requirement(mut self, requires: Requirement) -> Self {
        self.requires = requires;
        self
    }

    /// Mark the dependency as required (absence is fatal).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Suppress informational output.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Pin the header directory, bypassing the header search.
    pub fn with_header_override(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overrides.header_dir = Some(dir.into());
        self
    }

    /// Pin the library file, bypassing the library search.
    pub fn with_library_override(mut self, file: impl Into<PathBuf>) -> Self {
        self.overrides.library_file = Some(file.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let req = ProbeRequest::new();
        assert_eq!(req.requires, Requirement::Both);
        assert!(!req.required);
        assert!(!req.quiet);
        assert!(req.overrides.is_empty());
    }

    #[test]
    fn test_builder_orders_candidates() {
        let req = ProbeRequest::new()
            .with_header_names(["foo.h", "foo/foo.h"])
            .with_header_dirs(["/opt/foo/include", "/usr/include"]);

        assert_eq!(req.header_names, vec!["foo.h", "foo/foo.h"]);
        assert_eq!(
            req.header_dirs,
            vec![
                PathBuf::from("/opt/foo/include"),
                PathBuf::from("/usr/include")
            ]
        );
    }

    #[test]
    fn test_requirement_artifacts() {
        assert!(Requirement::Both.needs_header());
        assert!(Requirement::Both.needs_library());
        assert!(Requirement::Header.needs_header());
        assert!(!Requirement::Header.needs_library());
        assert!(!Requirement::Library.needs_header());
        assert!(Requirement::Library.needs_library());
    }

    #[test]
    fn test_requirement_parses_from_toml() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            requires: Requirement,
        }

        let w: Wrapper = toml::from_str("requires = \"library\"").unwrap();
        assert_eq!(w.requires, Requirement::Library);
    }
}
