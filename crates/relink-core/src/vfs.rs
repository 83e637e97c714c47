//! Filesystem capability.
//!
//! The locator never touches `std::fs` directly; all probes go through a
//! [`FileSystem`] trait so the engine runs against an in-memory fixture in
//! tests and is portable across host environments.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only filesystem capability used by candidate location.
///
/// Implementations should be thread-safe (Send + Sync): a host may resolve
/// many specifiers in parallel against one filesystem.
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Does `path` name an existing regular file?
    fn is_file(&self, path: &Path) -> bool;

    /// Does `path` name an existing directory?
    fn is_dir(&self, path: &Path) -> bool;

    /// Read the file at `path` as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Production implementation backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory implementation for tests and virtual hosts.
///
/// Directories are implicit: any ancestor of a stored file path is a
/// directory. Paths are normalized lexically on insert and lookup, so
/// `/a/./b` and `/a/b` name the same file.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a file, creating implicit parent directories.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .insert(crate::paths::normalize(&path.into()), content.into());
    }

    /// Builder-style [`MemoryFileSystem::insert`].
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&crate::paths::normalize(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let dir = crate::paths::normalize(path);
        self.files
            .keys()
            .any(|file| file != &dir && file.starts_with(&dir))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&crate::paths::normalize(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fs_file_and_dir() {
        let fs = MemoryFileSystem::new().with_file("/proj/src/index.js", "export {};");

        assert!(fs.is_file(Path::new("/proj/src/index.js")));
        assert!(fs.is_file(Path::new("/proj/./src/index.js")));
        assert!(!fs.is_file(Path::new("/proj/src")));

        assert!(fs.is_dir(Path::new("/proj")));
        assert!(fs.is_dir(Path::new("/proj/src")));
        assert!(!fs.is_dir(Path::new("/proj/src/index.js")));
        assert!(!fs.is_dir(Path::new("/other")));
    }

    #[test]
    fn test_memory_fs_read() {
        let fs = MemoryFileSystem::new().with_file("/a/b.json", "{}");
        assert_eq!(fs.read_to_string(Path::new("/a/b.json")).unwrap(), "{}");
        assert!(fs.read_to_string(Path::new("/a/missing.json")).is_err());
    }
}
