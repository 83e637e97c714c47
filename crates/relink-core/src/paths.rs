//! Pure path arithmetic.
//!
//! The formatter and locator only ever reason about paths lexically; the
//! disk is never consulted here. Keeping `..`/`.` resolution lexical means
//! the in-memory filesystem used in tests behaves exactly like the real one.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components lexically.
///
/// Absolute paths never escape their root; relative paths keep leading
/// `..` components.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            other => components.push(other),
        }
    }

    components.iter().collect()
}

/// Lexical relative path from directory `from` to `to`.
///
/// Both inputs are normalized first; the result uses `..` segments to climb
/// out of `from` and is empty when the paths are equal.
#[must_use]
pub fn relative(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);

    let from_components: Vec<Component> = from.components().collect();
    let to_components: Vec<Component> = to.components().collect();

    let mut shared = 0;
    while shared < from_components.len()
        && shared < to_components.len()
        && from_components[shared] == to_components[shared]
    {
        shared += 1;
    }

    let mut result = PathBuf::new();
    for _ in shared..from_components.len() {
        result.push("..");
    }
    for component in &to_components[shared..] {
        result.push(component.as_os_str());
    }
    result
}

/// Render a path with URL-style forward slashes.
///
/// On platforms with backslash separators this is the only place the
/// difference is visible to output specifiers.
#[must_use]
pub fn forward_slashes(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.contains('\\') {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// Append an extension (with its leading dot) to the final path segment.
///
/// Unlike `Path::with_extension` this never replaces an existing suffix:
/// `foo.bar` + `.js` is `foo.bar.js`.
#[must_use]
pub fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(ext);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/a/./b/../c/file.js")),
            PathBuf::from("/a/c/file.js")
        );
        assert_eq!(normalize(Path::new("/a/b/..")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(normalize(Path::new("a/b/../..")), PathBuf::from(""));
    }

    #[test]
    fn test_relative_descends() {
        assert_eq!(
            relative(Path::new("/proj"), Path::new("/proj/src/app.js")),
            PathBuf::from("src/app.js")
        );
    }

    #[test]
    fn test_relative_climbs() {
        assert_eq!(
            relative(
                Path::new("/proj/node_modules/path-is-inside"),
                Path::new("/proj/node_modules/is-windows/index.js")
            ),
            PathBuf::from("../is-windows/index.js")
        );
    }

    #[test]
    fn test_relative_equal_is_empty() {
        assert_eq!(relative(Path::new("/a/b"), Path::new("/a/b")), PathBuf::new());
    }

    #[test]
    fn test_append_extension_keeps_existing_suffix() {
        assert_eq!(
            append_extension(Path::new("/x/foo.bar"), ".js"),
            PathBuf::from("/x/foo.bar.js")
        );
    }
}
