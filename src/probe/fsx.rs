//! Filesystem abstraction for probing.
//!
//! Probes only ever perform existence checks and directory listings, so the
//! seam is deliberately small. Tests use the counting mock in
//! `test_support` to verify that cached probes never touch the filesystem.

use std::path::Path;

/// Read-only filesystem operations used by the prober.
pub trait FileSystem {
    /// Whether a file exists at `path`.
    fn file_exists(&self, path: &Path) -> bool;

    /// Whether a directory exists at `path`.
    fn dir_exists(&self, path: &Path) -> bool;

    /// File names (not full paths) of entries directly under `dir`.
    /// An unreadable or missing directory yields an empty listing.
    fn list_dir(&self, dir: &Path) -> Vec<String>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect()
    }
}
