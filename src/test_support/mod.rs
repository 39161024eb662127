//! Test utilities and mocks for Lodestone unit tests.
//!
//! The central piece is [`MockFileSystem`], an in-memory filesystem that
//! counts every access. Probe tests use the counter to assert that cached
//! outcomes are answered without touching the filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use lodestone::test_support::MockFileSystem;
//!
//! #[test]
//! fn test_example() {
//!     let mut fs = MockFileSystem::new();
//!     fs.add_file("/usr/include/zlib.h");
//!     assert_eq!(fs.access_count(), 0);
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::probe::fsx::FileSystem;

/// Mock filesystem for testing without real I/O.
///
/// Stores file paths only (directories are implied by their contents) and
/// records how many filesystem operations have been performed.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: BTreeSet<PathBuf>,
    accesses: AtomicUsize,
}

impl MockFileSystem {
    /// Create a new empty mock filesystem.
    pub fn new() -> Self {
        MockFileSystem::default()
    }

    /// Add an empty file, implying all parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.files.insert(path.as_ref().to_path_buf());
    }

    /// Number of filesystem operations performed so far.
    pub fn access_count(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }

    /// Reset the access counter.
    pub fn reset_access_count(&self) {
        self.accesses.store(0, Ordering::SeqCst);
    }

    fn record(&self) {
        self.accesses.fetch_add(1, Ordering::SeqCst);
    }

    fn contains_dir(&self, path: &Path) -> bool {
        self.files.iter().any(|f| {
            f.ancestors()
                .skip(1)
                .any(|ancestor| ancestor == path)
        })
    }
}

impl FileSystem for MockFileSystem {
    fn file_exists(&self, path: &Path) -> bool {
        self.record();
        self.files.contains(path)
    }

    fn dir_exists(&self, path: &Path) -> bool {
        self.record();
        self.contains_dir(path)
    }

    fn list_dir(&self, dir: &Path) -> Vec<String> {
        self.record();
        self.files
            .iter()
            .filter(|f| f.parent() == Some(dir))
            .filter_map(|f| f.file_name())
            .filter_map(|n| n.to_str())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem_files_and_dirs() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/usr/include/zlib.h");

        assert!(fs.file_exists(Path::new("/usr/include/zlib.h")));
        assert!(!fs.file_exists(Path::new("/usr/include/png.h")));
        assert!(fs.dir_exists(Path::new("/usr/include")));
        assert!(fs.dir_exists(Path::new("/usr")));
        assert!(!fs.dir_exists(Path::new("/opt")));
    }

    #[test]
    fn test_mock_filesystem_listing() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/usr/lib/libz.so");
        fs.add_file("/usr/lib/libpng.so");
        fs.add_file("/usr/lib/pkgconfig/zlib.pc");

        let names = fs.list_dir(Path::new("/usr/lib"));
        assert_eq!(names, vec!["libpng.so", "libz.so"]);
    }

    #[test]
    fn test_access_counter() {
        let mut fs = MockFileSystem::new();
        fs.add_file("/usr/include/zlib.h");
        assert_eq!(fs.access_count(), 0);

        fs.file_exists(Path::new("/usr/include/zlib.h"));
        fs.dir_exists(Path::new("/usr/include"));
        fs.list_dir(Path::new("/usr/include"));
        assert_eq!(fs.access_count(), 3);

        fs.reset_access_count();
        assert_eq!(fs.access_count(), 0);
    }
}
