//! Dependency manifest (`Lodestone.toml`) and candidate derivation.
//!
//! A manifest declares named dependencies together with their candidate
//! header names, library name patterns, and search hints. At probe time a
//! [`DependencySpec`] is lowered to a [`ProbeRequest`] by combining the
//! declared candidates with environment overrides, configured prefixes, and
//! standard installation-prefix conventions.
//!
//! Resolution order for each dependency (highest to lowest):
//! 1. `<NAME>_INCLUDE_DIR` / `<NAME>_LIBRARY` environment variables -
//!    trusted as-is, the search is skipped for that artifact.
//! 2. `<NAME>_ROOT` (or the spec's `env` variable) - pins the search to
//!    that prefix alone; declared candidate directories are not consulted.
//! 3. Declared `prefixes`, then user-config prefixes, then a prefix derived
//!    from the location of the spec's `tool` binary, then standard prefixes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::request::{ProbeRequest, Requirement};
use crate::core::result::var_prefix;

/// Manifest file name searched for in the current directory and its parents.
pub const MANIFEST_NAME: &str = "Lodestone.toml";

/// Standard installation prefixes searched after all hints.
#[cfg(unix)]
const STANDARD_PREFIXES: &[&str] = &["/usr/local", "/usr"];

#[cfg(windows)]
const STANDARD_PREFIXES: &[&str] = &["C:\\Program Files", "C:\\Program Files (x86)"];

/// A parsed `Lodestone.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Named dependency declarations, probed in name order.
    pub dependencies: BTreeMap<String, DependencySpec>,
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Look up a dependency by name.
    pub fn get(&self, name: &str) -> Option<&DependencySpec> {
        self.dependencies.get(name)
    }
}

/// Find `Lodestone.toml` starting from `start` and walking up parent
/// directories.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(MANIFEST_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

/// A single dependency declaration in the manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DependencySpec {
    /// Candidate header file names, in priority order.
    pub headers: Vec<String>,

    /// Candidate binary artifact names, possibly glob patterns.
    pub libraries: Vec<String>,

    /// Which artifacts must be located.
    pub requires: Requirement,

    /// Absence is fatal when true.
    pub required: bool,

    /// Suppress the informational success message.
    pub quiet: bool,

    /// Environment variable pinning the install prefix
    /// (defaults to `<NAME>_ROOT`).
    pub env: Option<String>,

    /// Extra install prefixes, searched before everything else.
    pub prefixes: Vec<PathBuf>,

    /// A binary whose on-PATH location hints the install prefix
    /// (e.g. `foo-config` at `<prefix>/bin/foo-config`).
    pub tool: Option<String>,
}

impl DependencySpec {
    /// Lower this spec to a probe request using the real process
    /// environment.
    pub fn to_request(&self, name: &str, config_prefixes: &[PathBuf]) -> ProbeRequest {
        self.to_request_with_env(name, config_prefixes, &|var| std::env::var(var).ok())
    }

    /// Lower this spec to a probe request with an injected environment
    /// lookup.
    pub fn to_request_with_env(
        &self,
        name: &str,
        config_prefixes: &[PathBuf],
        env: &dyn Fn(&str) -> Option<String>,
    ) -> ProbeRequest {
        let prefix = var_prefix(name);

        let mut request = ProbeRequest::new()
            .with_header_names(self.headers.clone())
            .with_library_names(self.libraries.clone())
            .with_requirement(self.requires)
            .required(self.required)
            .quiet(self.quiet);

        // Per-artifact pins are trusted as-is.
        if let Some(dir) = non_empty(env(&format!("{}_INCLUDE_DIR", prefix))) {
            request.overrides.header_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = non_empty(env(&format!("{}_LIBRARY", prefix))) {
            request.overrides.library_file = Some(PathBuf::from(file));
        }

        // A pinned root replaces the candidate prefix list entirely.
        let root_var = self
            .env
            .clone()
            .unwrap_or_else(|| format!("{}_ROOT", prefix));

        let prefixes = if let Some(root) = non_empty(env(&root_var)) {
            tracing::debug!("{}: prefix pinned by ${} = {}", name, root_var, root);
            vec![PathBuf::from(root)]
        } else {
            self.candidate_prefixes(name, config_prefixes)
        };

        request.header_dirs = prefixes.iter().map(|p| p.join("include")).collect();
        request.library_dirs = prefixes
            .iter()
            .flat_map(|p| [p.join("lib"), p.join("lib64")])
            .collect();

        request
    }

    /// Build the prefix list searched when no root is pinned.
    fn candidate_prefixes(&self, name: &str, config_prefixes: &[PathBuf]) -> Vec<PathBuf> {
        let mut prefixes: Vec<PathBuf> = Vec::new();

        prefixes.extend(self.prefixes.iter().cloned());
        prefixes.extend(config_prefixes.iter().cloned());

        if let Some(prefix) = self.tool_prefix() {
            prefixes.push(prefix);
        }

        prefixes.extend(STANDARD_PREFIXES.iter().map(PathBuf::from));

        #[cfg(unix)]
        prefixes.push(PathBuf::from("/opt").join(name));

        #[cfg(windows)]
        let _ = name;

        prefixes.dedup();
        prefixes
    }

    /// Derive an install prefix from the spec's helper tool, if it is on
    /// PATH. A binary at `<prefix>/bin/<tool>` hints `<prefix>`.
    fn tool_prefix(&self) -> Option<PathBuf> {
        let tool = self.tool.as_deref()?;
        let path = which::which(tool).ok()?;
        let prefix = path.parent()?.parent()?;

        tracing::debug!(
            "derived prefix {} from tool `{}`",
            prefix.display(),
            tool
        );
        Some(prefix.to_path_buf())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_manifest() {
        let manifest: Manifest = toml::from_str(
            r#"
            [dependencies.zlib]
            headers = ["zlib.h"]
            libraries = ["libz.so*", "libz.a"]
            required = true

            [dependencies.png]
            headers = ["png.h"]
            libraries = ["libpng.so*"]
            requires = "library"
            prefixes = ["/opt/libpng"]
            "#,
        )
        .unwrap();

        let zlib = manifest.get("zlib").unwrap();
        assert!(zlib.required);
        assert_eq!(zlib.requires, Requirement::Both);
        assert_eq!(zlib.headers, vec!["zlib.h"]);

        let png = manifest.get("png").unwrap();
        assert!(!png.required);
        assert_eq!(png.requires, Requirement::Library);
        assert_eq!(png.prefixes, vec![PathBuf::from("/opt/libpng")]);
    }

    #[test]
    fn test_declared_prefixes_come_first() {
        let spec = DependencySpec {
            headers: vec!["foo.h".to_string()],
            libraries: vec!["libfoo.so".to_string()],
            prefixes: vec![PathBuf::from("/opt/foo")],
            ..Default::default()
        };

        let env = env_of(&[]);
        let request = spec.to_request_with_env("foo", &[PathBuf::from("/opt/extra")], &|var| {
            env.get(var).cloned()
        });

        // Declared prefix first, then config prefix, then standard ones.
        assert_eq!(request.header_dirs[0], PathBuf::from("/opt/foo/include"));
        assert_eq!(request.header_dirs[1], PathBuf::from("/opt/extra/include"));
        assert_eq!(request.library_dirs[0], PathBuf::from("/opt/foo/lib"));
        assert_eq!(request.library_dirs[1], PathBuf::from("/opt/foo/lib64"));
    }

    #[test]
    fn test_root_env_pins_prefix() {
        let spec = DependencySpec {
            headers: vec!["foo.h".to_string()],
            libraries: vec!["libfoo.so".to_string()],
            prefixes: vec![PathBuf::from("/opt/foo")],
            ..Default::default()
        };

        let env = env_of(&[("FOO_ROOT", "/custom/foo")]);
        let request =
            spec.to_request_with_env("foo", &[], &|var| env.get(var).cloned());

        assert_eq!(
            request.header_dirs,
            vec![PathBuf::from("/custom/foo/include")]
        );
        assert_eq!(
            request.library_dirs,
            vec![
                PathBuf::from("/custom/foo/lib"),
                PathBuf::from("/custom/foo/lib64")
            ]
        );
    }

    #[test]
    fn test_custom_env_variable_name() {
        let spec = DependencySpec {
            env: Some("MY_FOO_HOME".to_string()),
            ..Default::default()
        };

        let env = env_of(&[("MY_FOO_HOME", "/home/me/foo")]);
        let request =
            spec.to_request_with_env("foo", &[], &|var| env.get(var).cloned());

        assert_eq!(
            request.header_dirs,
            vec![PathBuf::from("/home/me/foo/include")]
        );
    }

    #[test]
    fn test_include_and_library_env_overrides() {
        let spec = DependencySpec::default();

        let env = env_of(&[
            ("FOO_INCLUDE_DIR", "/pinned/include"),
            ("FOO_LIBRARY", "/pinned/lib/libfoo.so"),
        ]);
        let request =
            spec.to_request_with_env("foo", &[], &|var| env.get(var).cloned());

        assert_eq!(
            request.overrides.header_dir,
            Some(PathBuf::from("/pinned/include"))
        );
        assert_eq!(
            request.overrides.library_file,
            Some(PathBuf::from("/pinned/lib/libfoo.so"))
        );
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let spec = DependencySpec::default();

        let env = env_of(&[("FOO_INCLUDE_DIR", ""), ("FOO_ROOT", "")]);
        let request =
            spec.to_request_with_env("foo", &[], &|var| env.get(var).cloned());

        assert!(request.overrides.is_empty());
        assert!(request.header_dirs.len() > 1, "standard prefixes expected");
    }

    #[test]
    fn test_find_manifest_walks_up() {
        let tmp = tempfile::TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join(MANIFEST_NAME), "").unwrap();

        let found = find_manifest(&nested).unwrap();
        assert_eq!(found, tmp.path().join(MANIFEST_NAME));
    }

    #[test]
    fn test_find_manifest_missing() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(find_manifest(tmp.path()).is_none());
    }
}
