#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

//! Specifier resolution and rewriting engine.
//!
//! Rewrites module import/export specifiers so that bare package names
//! (normally resolved at runtime by ascending module-directory search)
//! become specifiers a loader without a resolution algorithm can fetch:
//! relative paths, mounted paths under a virtual prefix, or full URLs.
//!
//! The engine is synchronous and stateless across calls: each
//! [`Resolver::resolve`] is a pure function of its inputs plus filesystem
//! state, observed through an injected [`FileSystem`] capability.

pub mod config;
pub mod error;
pub mod paths;
pub mod pattern;
pub mod resolver;
pub mod rewrite;
pub mod specifier;
pub mod vfs;

pub use config::Config;
pub use error::Error;
pub use resolver::{Diagnostic, ResolveResult, Resolver};
pub use rewrite::{scan_imports, ImportKind, ImportSite, RewriteOutput, Rewriter};
pub use specifier::{classify, package_name, SpecifierKind};
pub use vfs::{FileSystem, MemoryFileSystem, OsFileSystem};
