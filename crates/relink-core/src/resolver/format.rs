//! Output specifier formatting.
//!
//! Re-encodes a resolved absolute path as the specifier the target loader
//! will see. Pure path arithmetic: no filesystem or network access.

use crate::config::Config;
use crate::paths::{forward_slashes, normalize, relative};
use crate::specifier::{classify, SpecifierKind};
use std::path::{Path, PathBuf};

/// Format a resolved absolute path as an output specifier.
///
/// A dependency hit (resolved path inside one of the module roots under
/// `root_base_dir`) imported from outside any module root is rooted under
/// the configured mount; everything else is emitted relative to the
/// importing file. Non-URL, non-fsPath outputs always start with `./`,
/// `../`, or `/` so the target loader never re-interprets them as bare.
#[must_use]
pub fn format_specifier(resolved: &Path, source_file: &Path, config: &Config) -> String {
    let resolved = normalize(resolved);
    let source_file = normalize(source_file);
    let source_dir = source_file.parent().unwrap_or(Path::new("/"));

    let target_root = module_root_of(&resolved, config);
    let originates = module_root_of(&source_file, config).is_some();

    if let Some((module_root, directory_name)) = target_root {
        if !originates {
            if config.fs_path {
                // Raw filesystem path for loaders that accept them;
                // platform separators preserved.
                return resolved.display().to_string();
            }

            let rel = forward_slashes(&relative(&module_root, &resolved));
            return match config.modules_dir.as_deref() {
                Some(mount) if classify(mount) == SpecifierKind::ExternalUrl => {
                    // Exactly one separating slash, with or without a
                    // configured trailing slash.
                    format!("{}/{}", mount.trim_end_matches('/'), rel)
                }
                Some(mount) => {
                    ensure_path_specifier(&format!("{}/{}", mount.trim_end_matches('/'), rel))
                }
                None => {
                    let mount = forward_slashes(Path::new(&directory_name));
                    format!("/{mount}/{rel}")
                }
            };
        }
    }

    ensure_path_specifier(&forward_slashes(&relative(source_dir, &resolved)))
}

/// The configured module root (and its directory name) that `path` lives
/// under, if any.
fn module_root_of(path: &Path, config: &Config) -> Option<(PathBuf, String)> {
    for directory in &config.resolve_directories {
        let root = normalize(&config.root_base_dir.join(directory));
        if path.starts_with(&root) && path != root.as_path() {
            return Some((root, directory.clone()));
        }
    }
    None
}

/// Prefix `./` unless the string already reads as a path specifier
/// (zero, one, or two leading dot segments followed by a slash).
fn ensure_path_specifier(specifier: &str) -> String {
    if specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/') {
        specifier.to_string()
    } else {
        format!("./{specifier}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new("/proj")
    }

    #[test]
    fn test_sibling_file_is_relative() {
        let out = format_specifier(
            Path::new("/proj/src/util.js"),
            Path::new("/proj/src/app.js"),
            &config(),
        );
        assert_eq!(out, "./util.js");
    }

    #[test]
    fn test_parent_file_is_relative() {
        let out = format_specifier(
            Path::new("/proj/index.js"),
            Path::new("/proj/src/app.js"),
            &config(),
        );
        assert_eq!(out, "../index.js");
    }

    #[test]
    fn test_dependency_hit_gets_default_mount() {
        let out = format_specifier(
            Path::new("/proj/node_modules/pkg/index.js"),
            Path::new("/proj/app.js"),
            &config(),
        );
        assert_eq!(out, "/node_modules/pkg/index.js");
    }

    #[test]
    fn test_dependency_hit_gets_configured_mount() {
        let config = config().with_modules_dir("/assets");
        let out = format_specifier(
            Path::new("/proj/node_modules/pkg/index.js"),
            Path::new("/proj/app.js"),
            &config,
        );
        assert_eq!(out, "/assets/pkg/index.js");
    }

    #[test]
    fn test_url_mount_single_slash() {
        for mount in [
            "https://example.com/node_modules",
            "https://example.com/node_modules/",
        ] {
            let config = config().with_modules_dir(mount);
            let out = format_specifier(
                Path::new("/proj/node_modules/is-windows/index.js"),
                Path::new("/proj/app.js"),
                &config,
            );
            assert_eq!(out, "https://example.com/node_modules/is-windows/index.js");
        }
    }

    #[test]
    fn test_import_between_dependencies_stays_relative() {
        let out = format_specifier(
            Path::new("/proj/node_modules/is-windows/index.js"),
            Path::new("/proj/node_modules/path-is-inside/index.js"),
            &config(),
        );
        assert_eq!(out, "../is-windows/index.js");
    }

    #[test]
    fn test_fs_path_emits_absolute_path() {
        let config = config().with_fs_path(true);
        let out = format_specifier(
            Path::new("/proj/node_modules/pkg/index.js"),
            Path::new("/proj/app.js"),
            &config,
        );
        assert_eq!(out, "/proj/node_modules/pkg/index.js");
    }

    #[test]
    fn test_alternate_resolve_directory_default_mount() {
        let config = config()
            .with_resolve_directories(vec!["web_modules".into(), "node_modules".into()]);
        let out = format_specifier(
            Path::new("/proj/web_modules/pkg/index.js"),
            Path::new("/proj/app.js"),
            &config,
        );
        assert_eq!(out, "/web_modules/pkg/index.js");
    }

    #[test]
    fn test_source_inside_any_module_root_stays_relative() {
        let config = config()
            .with_resolve_directories(vec!["web_modules".into(), "node_modules".into()]);
        // Importing file lives in web_modules; hit is in node_modules.
        let out = format_specifier(
            Path::new("/proj/node_modules/pkg/index.js"),
            Path::new("/proj/web_modules/other/app.js"),
            &config,
        );
        assert_eq!(out, "../../node_modules/pkg/index.js");
    }

    #[test]
    fn test_relative_mount_gets_dot_prefix() {
        let config = config().with_modules_dir("assets");
        let out = format_specifier(
            Path::new("/proj/node_modules/pkg/index.js"),
            Path::new("/proj/app.js"),
            &config,
        );
        assert_eq!(out, "./assets/pkg/index.js");
    }
}
