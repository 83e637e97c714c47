//! Resolution orchestration.
//!
//! The public entry point: ignore-prefix short-circuit, classification,
//! root-import policy, candidate location, output formatting, and the
//! fatal/non-fatal error policy for unresolved specifiers.

use super::format::format_specifier;
use super::locate::Locator;
use super::policy::choose_search_root;
use crate::config::Config;
use crate::error::Error;
use crate::paths::normalize;
use crate::specifier::{classify, SpecifierKind};
use crate::vfs::{FileSystem, OsFileSystem};
use std::path::{Path, PathBuf};

/// Non-fatal report for a specifier that could not be resolved.
///
/// The core never logs; the host decides what to do with the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The specifier as written in source.
    pub specifier: String,
    /// Absolute path of the file containing it.
    pub source_file: PathBuf,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot resolve '{}' from '{}'",
            self.specifier,
            self.source_file.display()
        )
    }
}

/// Outcome of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
    /// The output specifier: a replacement, or the input unchanged.
    pub specifier: String,
    /// Present when the specifier was kept because nothing resolved.
    pub diagnostic: Option<Diagnostic>,
}

impl ResolveResult {
    fn unchanged(specifier: &str) -> Self {
        Self {
            specifier: specifier.to_string(),
            diagnostic: None,
        }
    }

    fn rewritten(specifier: String) -> Self {
        Self {
            specifier,
            diagnostic: None,
        }
    }
}

/// Specifier resolver.
///
/// Holds only the read-only configuration and the filesystem capability,
/// so one instance can serve interleaved or parallel calls.
#[derive(Debug)]
pub struct Resolver {
    config: Config,
    fs: Box<dyn FileSystem>,
}

impl Resolver {
    /// Create a resolver over the real filesystem.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_fs(config, Box::new(OsFileSystem))
    }

    /// Create a resolver over an injected filesystem capability.
    #[must_use]
    pub fn with_fs(config: Config, fs: Box<dyn FileSystem>) -> Self {
        Self { config, fs }
    }

    /// The configuration this resolver was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve one specifier found in `source_file`.
    ///
    /// Returns the replacement specifier, or the input unchanged for
    /// external URLs, ignored prefixes, and (without `failOnUnresolved`)
    /// unresolved specifiers — the last with a [`Diagnostic`] attached.
    /// With `failOnUnresolved`, an unresolved specifier is an
    /// [`Error::Unresolved`].
    pub fn resolve(&self, specifier: &str, source_file: &Path) -> Result<ResolveResult, Error> {
        // Explicit user escape hatch: no classification, no I/O.
        if self
            .config
            .ignore_prefixes
            .iter()
            .any(|prefix| specifier.starts_with(prefix.as_str()))
        {
            return Ok(ResolveResult::unchanged(specifier));
        }

        if classify(specifier) == SpecifierKind::ExternalUrl {
            return Ok(ResolveResult::unchanged(specifier));
        }

        let source_file = self.absolute_source(source_file);
        let source_dir = source_file.parent().unwrap_or(Path::new("/")).to_path_buf();
        let search_root = choose_search_root(specifier, &source_dir, &self.config);

        let locator = Locator::new(self.fs.as_ref(), &self.config.resolve_directories);
        match locator.locate(specifier, search_root) {
            Some(resolved) => Ok(ResolveResult::rewritten(format_specifier(
                &resolved,
                &source_file,
                &self.config,
            ))),
            None if self.config.fail_on_unresolved => Err(Error::Unresolved {
                specifier: specifier.to_string(),
                source_file,
            }),
            None => Ok(ResolveResult {
                specifier: specifier.to_string(),
                diagnostic: Some(Diagnostic {
                    specifier: specifier.to_string(),
                    source_file,
                }),
            }),
        }
    }

    /// Resolution is a pure function of explicit inputs: a relative source
    /// path is anchored at the configured root, never at ambient process
    /// state.
    fn absolute_source(&self, source_file: &Path) -> PathBuf {
        if source_file.is_absolute() {
            normalize(source_file)
        } else {
            normalize(&self.config.root_base_dir.join(source_file))
        }
    }
}
