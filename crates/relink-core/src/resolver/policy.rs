//! Root-import policy.
//!
//! Decides where the ascent for a bare specifier starts: the importing
//! file's own directory (nearest-wins, mirroring conventional module
//! search) or the fixed project root.

use crate::config::Config;
use crate::pattern;
use crate::specifier::{classify, package_name, SpecifierKind};
use std::path::Path;

/// Choose the directory the candidate search starts from.
///
/// Non-bare specifiers always search from the importing file's directory.
/// For bare specifiers the package name is matched against the
/// alwaysRootImport patterns; a neverRootImport match wins over any
/// alwaysRootImport match, so a broad allow pattern can be narrowed by
/// specific exceptions.
#[must_use]
pub fn choose_search_root<'a>(
    specifier: &str,
    source_dir: &'a Path,
    config: &'a Config,
) -> &'a Path {
    if classify(specifier) != SpecifierKind::Bare {
        return source_dir;
    }
    if config.always_root_import.is_empty() {
        return source_dir;
    }

    let name = package_name(specifier);
    if pattern::matches_any(name, &config.always_root_import)
        && !pattern::matches_any(name, &config.never_root_import)
    {
        &config.root_base_dir
    } else {
        source_dir
    }
}
