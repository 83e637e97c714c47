//! Host integration adapter.
//!
//! The resolver core only maps one specifier string to another; this
//! module is the bridge to actual source text. [`scan_imports`] finds the
//! import sites, [`Rewriter`] splices replacement specifiers back in and
//! collects the non-fatal diagnostics.

mod scan;

pub use scan::{scan_imports, ImportKind, ImportSite};

use crate::error::Error;
use crate::resolver::{Diagnostic, Resolver};
use std::path::Path;

/// Result of rewriting one source file.
#[derive(Debug, Clone)]
pub struct RewriteOutput {
    /// The source with replacement specifiers spliced in.
    pub code: String,
    /// Whether any specifier actually changed.
    pub changed: bool,
    /// Non-fatal reports for specifiers kept unresolved.
    pub diagnostics: Vec<Diagnostic>,
}

/// Applies the resolver to every import site of a source file.
#[derive(Debug)]
pub struct Rewriter {
    resolver: Resolver,
}

impl Rewriter {
    /// Create a rewriter around a configured resolver.
    #[must_use]
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// The underlying resolver.
    #[must_use]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Ordering contract with multi-pass hosts: when set, the host should
    /// apply this rewrite after passes that may inject new imports.
    #[must_use]
    pub fn process_at_program_exit(&self) -> bool {
        self.resolver.config().process_at_program_exit
    }

    /// Rewrite every import site in `source`.
    ///
    /// All bytes outside the string literals are preserved exactly, quote
    /// style included. With `failOnUnresolved` set, the first unresolved
    /// specifier aborts the whole file.
    pub fn rewrite_source(&self, source: &str, source_file: &Path) -> Result<RewriteOutput, Error> {
        let mut code = String::with_capacity(source.len());
        let mut diagnostics = Vec::new();
        let mut changed = false;
        let mut cursor = 0;

        for site in scan_imports(source) {
            let resolved = self.resolver.resolve(&site.specifier, source_file)?;
            if let Some(diagnostic) = resolved.diagnostic {
                diagnostics.push(diagnostic);
            }
            if resolved.specifier != site.specifier {
                changed = true;
            }
            code.push_str(&source[cursor..site.span.start]);
            code.push_str(&resolved.specifier);
            cursor = site.span.end;
        }
        code.push_str(&source[cursor..]);

        Ok(RewriteOutput {
            code,
            changed,
            diagnostics,
        })
    }
}
