//! Candidate location.
//!
//! Turns a specifier plus a starting directory into an absolute file path:
//! - Path specifiers: exact file, then appended extensions, then directory
//!   resolution through package metadata.
//! - Bare specifiers: ascend from the search root toward the filesystem
//!   root, scanning every configured module directory at each level before
//!   ascending further.

use crate::paths::{append_extension, normalize};
use crate::specifier::{classify, SpecifierKind};
use crate::vfs::FileSystem;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Extensions probed after an exact-file miss, in order.
///
/// `.json` and `.node` files are not loadable as browser modules, but the
/// runtime resolution algorithm probes them, so the rewrite does too: the
/// user gets an invalid-MIME error pointing at the real file instead of a
/// plain 404.
pub const EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Package metadata entry fields, in precedence order. The first two are
/// non-standard fields packages use for their ES module build.
const ENTRY_FIELDS: &[&str] = &["module", "jsnext:main", "main"];

const PACKAGE_METADATA_FILE: &str = "package.json";
const INDEX_FILE: &str = "index";

/// Filesystem search for resolution candidates.
pub struct Locator<'a> {
    fs: &'a dyn FileSystem,
    resolve_directories: &'a [String],
}

impl<'a> Locator<'a> {
    /// Create a locator over the given filesystem capability.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, resolve_directories: &'a [String]) -> Self {
        Self {
            fs,
            resolve_directories,
        }
    }

    /// Locate the file a specifier points at, searching from `search_root`.
    ///
    /// Returns `None` when no candidate exists at any level; the caller
    /// decides whether that is fatal.
    #[must_use]
    pub fn locate(&self, specifier: &str, search_root: &Path) -> Option<PathBuf> {
        match classify(specifier) {
            SpecifierKind::ExternalUrl => None,
            SpecifierKind::Path => {
                let raw = Path::new(specifier);
                let base = if raw.is_absolute() {
                    normalize(raw)
                } else {
                    normalize(&search_root.join(raw))
                };
                self.load_path(&base)
            }
            SpecifierKind::Bare => self.locate_bare(specifier, search_root),
        }
    }

    /// Ascend toward the filesystem root, probing each configured module
    /// directory in order at every level. Directory order outranks ascent
    /// depth: all names are scanned at a level before moving up.
    fn locate_bare(&self, specifier: &str, search_root: &Path) -> Option<PathBuf> {
        let search_root = normalize(search_root);
        for level in search_root.ancestors() {
            for module_dir in self.resolve_directories {
                let candidate = normalize(&level.join(module_dir).join(specifier));
                if let Some(hit) = self.load_path(&candidate) {
                    return Some(hit);
                }
            }
        }
        None
    }

    /// File probing first, directory resolution second.
    fn load_path(&self, base: &Path) -> Option<PathBuf> {
        if let Some(file) = self.load_file(base) {
            return Some(file);
        }
        if self.fs.is_dir(base) {
            return self.load_directory(base);
        }
        None
    }

    /// Exact file, then each extension appended to the full name.
    fn load_file(&self, base: &Path) -> Option<PathBuf> {
        if self.fs.is_file(base) {
            return Some(base.to_path_buf());
        }
        for ext in EXTENSIONS {
            let candidate = append_extension(base, ext);
            if self.fs.is_file(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Package metadata entry field, then conventional index files.
    fn load_directory(&self, dir: &Path) -> Option<PathBuf> {
        if let Some(entry) = self.package_entry(dir) {
            let target = normalize(&dir.join(entry));
            if let Some(file) = self.load_file(&target) {
                return Some(file);
            }
            if self.fs.is_dir(&target) {
                if let Some(index) = self.load_index(&target) {
                    return Some(index);
                }
            }
        }
        self.load_index(dir)
    }

    fn load_index(&self, dir: &Path) -> Option<PathBuf> {
        for ext in EXTENSIONS {
            let candidate = dir.join(format!("{INDEX_FILE}{ext}"));
            if self.fs.is_file(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    /// Read the directory's package metadata and select its entry field:
    /// a module/ES field, then the legacy alternate, then the standard
    /// main field. Unreadable or malformed metadata is treated as absent.
    fn package_entry(&self, dir: &Path) -> Option<String> {
        let metadata_path = dir.join(PACKAGE_METADATA_FILE);
        if !self.fs.is_file(&metadata_path) {
            return None;
        }
        let content = self.fs.read_to_string(&metadata_path).ok()?;
        let metadata: Value = serde_json::from_str(&content).ok()?;
        ENTRY_FIELDS
            .iter()
            .find_map(|field| metadata.get(field).and_then(Value::as_str))
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::MemoryFileSystem;

    fn node_modules() -> Vec<String> {
        vec!["node_modules".to_string()]
    }

    #[test]
    fn test_relative_exact_file() {
        let fs = MemoryFileSystem::new().with_file("/proj/src/util.js", "");
        let locator = Locator::new(&fs, &[]);
        assert_eq!(
            locator.locate("./util.js", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/src/util.js"))
        );
    }

    #[test]
    fn test_extension_probing_appends() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/src/util.js", "")
            .with_file("/proj/src/data.tar.json", "");
        let locator = Locator::new(&fs, &[]);
        assert_eq!(
            locator.locate("./util", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/src/util.js"))
        );
        // Appended, never substituted: data.tar -> data.tar.json
        assert_eq!(
            locator.locate("./data.tar", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/src/data.tar.json"))
        );
    }

    #[test]
    fn test_file_beats_directory() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/lib.js", "")
            .with_file("/proj/lib/index.js", "");
        let locator = Locator::new(&fs, &[]);
        assert_eq!(
            locator.locate("./lib", Path::new("/proj")),
            Some(PathBuf::from("/proj/lib.js"))
        );
    }

    #[test]
    fn test_directory_index_fallback() {
        let fs = MemoryFileSystem::new().with_file("/proj/lib/index.js", "");
        let locator = Locator::new(&fs, &[]);
        assert_eq!(
            locator.locate("./lib", Path::new("/proj")),
            Some(PathBuf::from("/proj/lib/index.js"))
        );
    }

    #[test]
    fn test_entry_field_precedence() {
        let fs = MemoryFileSystem::new()
            .with_file(
                "/proj/node_modules/pkg/package.json",
                r#"{"main": "./cjs.js", "jsnext:main": "./next.js", "module": "./esm.js"}"#,
            )
            .with_file("/proj/node_modules/pkg/cjs.js", "")
            .with_file("/proj/node_modules/pkg/next.js", "")
            .with_file("/proj/node_modules/pkg/esm.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/node_modules/pkg/esm.js"))
        );
    }

    #[test]
    fn test_legacy_entry_field_beats_main() {
        let fs = MemoryFileSystem::new()
            .with_file(
                "/proj/node_modules/pkg/package.json",
                r#"{"main": "./cjs.js", "jsnext:main": "./next.js"}"#,
            )
            .with_file("/proj/node_modules/pkg/cjs.js", "")
            .with_file("/proj/node_modules/pkg/next.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/node_modules/pkg/next.js"))
        );
    }

    #[test]
    fn test_entry_without_extension() {
        let fs = MemoryFileSystem::new()
            .with_file(
                "/proj/node_modules/pkg/package.json",
                r#"{"main": "lib/entry"}"#,
            )
            .with_file("/proj/node_modules/pkg/lib/entry.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/node_modules/pkg/lib/entry.js"))
        );
    }

    #[test]
    fn test_metadata_without_entry_falls_back_to_index() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/node_modules/pkg/package.json", r#"{"name": "pkg"}"#)
            .with_file("/proj/node_modules/pkg/index.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/node_modules/pkg/index.js"))
        );
    }

    #[test]
    fn test_bare_ascent_nearest_wins() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/node_modules/pkg/index.js", "")
            .with_file("/proj/node_modules/dep/node_modules/pkg/index.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/node_modules/dep")),
            Some(PathBuf::from("/proj/node_modules/dep/node_modules/pkg/index.js"))
        );
    }

    #[test]
    fn test_bare_subpath() {
        let fs = MemoryFileSystem::new().with_file("/proj/node_modules/pkg/lib/util.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(
            locator.locate("pkg/lib/util", Path::new("/proj/src")),
            Some(PathBuf::from("/proj/node_modules/pkg/lib/util.js"))
        );
    }

    #[test]
    fn test_directory_order_scanned_before_ascending() {
        let fs = MemoryFileSystem::new()
            .with_file("/proj/a/web_modules/pkg/index.js", "")
            .with_file("/proj/a/node_modules/pkg/index.js", "")
            // Deeper level has only the second-priority directory
            .with_file("/proj/a/b/node_modules/pkg/index.js", "");
        let dirs = vec!["web_modules".to_string(), "node_modules".to_string()];
        let locator = Locator::new(&fs, &dirs);

        // Nearest level wins even though its hit is in the lower-priority name
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/a/b")),
            Some(PathBuf::from("/proj/a/b/node_modules/pkg/index.js"))
        );
        // At one level, configured order decides
        assert_eq!(
            locator.locate("pkg", Path::new("/proj/a")),
            Some(PathBuf::from("/proj/a/web_modules/pkg/index.js"))
        );
    }

    #[test]
    fn test_unresolved_is_none() {
        let fs = MemoryFileSystem::new().with_file("/proj/src/app.js", "");
        let dirs = node_modules();
        let locator = Locator::new(&fs, &dirs);
        assert_eq!(locator.locate("missing", Path::new("/proj/src")), None);
        assert_eq!(locator.locate("./missing", Path::new("/proj/src")), None);
    }
}
