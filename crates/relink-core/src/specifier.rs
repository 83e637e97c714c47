//! Specifier classification.
//!
//! A raw specifier is exactly one of:
//! - an external URL (opaque; never resolved, returned unchanged),
//! - a path specifier (`./x`, `../x`, `/x`, plus the bare dot forms `.`
//!   and `..`, and Windows drive/UNC absolutes),
//! - a bare package specifier (`pkg`, `@scope/pkg/sub`).

use url::Url;

/// Classification of a raw specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// Conforms to the generic URL grammar; passes through unchanged.
    ExternalUrl,
    /// Relative or absolute filesystem path.
    Path,
    /// Package name, optionally scoped, optionally with a sub-path.
    Bare,
}

/// Classify a raw specifier.
///
/// Path forms are checked before the URL grammar so a Windows drive
/// absolute (`C:\x`) is not mistaken for a URL with scheme `c`.
#[must_use]
pub fn classify(specifier: &str) -> SpecifierKind {
    if is_path_specifier(specifier) {
        return SpecifierKind::Path;
    }
    if Url::parse(specifier).is_ok() {
        return SpecifierKind::ExternalUrl;
    }
    SpecifierKind::Bare
}

/// Is this a relative or absolute path specifier?
#[must_use]
pub fn is_path_specifier(specifier: &str) -> bool {
    if specifier == "." || specifier == ".." {
        return true;
    }
    if specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/') {
        return true;
    }

    // Windows drive absolute: C:\ or C:/
    let bytes = specifier.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        return true;
    }

    // UNC path: \\server\share
    specifier.starts_with("\\\\")
}

/// Truncate a bare specifier to its package name.
///
/// The name is the first path segment, except scoped names keep exactly
/// two segments: `@scope/pkg/sub` -> `@scope/pkg`, `pkg/sub` -> `pkg`.
#[must_use]
pub fn package_name(specifier: &str) -> &str {
    let segments_in_name = if specifier.starts_with('@') { 2 } else { 1 };

    let mut slashes = 0;
    for (i, c) in specifier.char_indices() {
        if c == '/' {
            slashes += 1;
            if slashes == segments_in_name {
                return &specifier[..i];
            }
        }
    }
    specifier
}
