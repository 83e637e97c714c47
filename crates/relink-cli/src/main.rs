#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::missing_errors_doc)]

mod logging;

use clap::Parser;
use miette::{miette, IntoDiagnostic, Result};
use rayon::prelude::*;
use relink_core::{paths, Config, Error, Resolver, RewriteOutput, Rewriter};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};
use walkdir::WalkDir;

/// Extensions treated as rewritable source files when walking directories.
const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

#[derive(Parser, Debug)]
#[command(name = "relink")]
#[command(author, version, about = "Rewrite bare module imports into loader-ready paths", long_about = None)]
struct Cli {
    /// Files or directories to rewrite
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Rewrite files in place instead of printing to stdout
    #[arg(short, long)]
    write: bool,

    /// Project root the module directories are anchored under
    /// (default: current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// JSON config file (camelCase option names: resolveDirectories,
    /// alwaysRootImport, ...)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Module-directory name to probe, in priority order (repeatable)
    #[arg(long = "resolve-dir", value_name = "NAME")]
    resolve_dirs: Vec<String>,

    /// Glob pattern of packages resolved from the project root (repeatable)
    #[arg(long, value_name = "GLOB")]
    always_root_import: Vec<String>,

    /// Glob pattern excluded from --always-root-import (repeatable)
    #[arg(long, value_name = "GLOB")]
    never_root_import: Vec<String>,

    /// Virtual mount path or URL for dependency rewrites
    #[arg(long, value_name = "MOUNT")]
    modules_dir: Option<String>,

    /// Emit raw filesystem paths for module-directory hits
    #[arg(long)]
    fs_path: bool,

    /// Literal specifier prefix exempted from rewriting (repeatable)
    #[arg(long = "ignore-prefix", value_name = "PREFIX")]
    ignore_prefixes: Vec<String>,

    /// Treat unresolved specifiers as fatal
    #[arg(long)]
    fail_on_unresolved: bool,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit JSON formatted logs
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json);

    let config = build_config(&cli)?;
    let rewriter = Rewriter::new(Resolver::new(config));

    let files = collect_files(&cli.paths);
    if files.is_empty() {
        return Err(miette!("no source files found"));
    }
    debug!(count = files.len(), "rewriting files");

    // The engine holds no cross-call state, so files rewrite in parallel;
    // logging and writes stay sequential for deterministic output.
    let outcomes: Vec<(PathBuf, Result<RewriteOutput, Error>)> = files
        .par_iter()
        .map(|file| {
            let outcome = std::fs::read_to_string(file)
                .map_err(Error::Io)
                .and_then(|source| rewriter.rewrite_source(&source, file));
            (file.clone(), outcome)
        })
        .collect();

    let mut failures = 0usize;
    for (file, outcome) in outcomes {
        match outcome {
            Ok(output) => {
                for diagnostic in &output.diagnostics {
                    warn!("{diagnostic}");
                }
                if cli.write {
                    if output.changed {
                        std::fs::write(&file, &output.code).into_diagnostic()?;
                        debug!(file = %file.display(), "rewrote");
                    }
                } else {
                    print!("{}", output.code);
                }
            }
            Err(err) => {
                error!(file = %file.display(), "{err}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(miette!("failed to rewrite {failures} file(s)"));
    }
    Ok(())
}

/// Build the engine configuration: config file first, then flag overrides.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path).into_diagnostic()?,
        None => Config::default(),
    };

    if let Some(root) = &cli.root {
        config.root_base_dir = absolutize(root);
    }
    if !cli.resolve_dirs.is_empty() {
        config.resolve_directories = cli.resolve_dirs.clone();
    }
    if !cli.always_root_import.is_empty() {
        config.always_root_import = cli.always_root_import.clone();
    }
    if !cli.never_root_import.is_empty() {
        config.never_root_import = cli.never_root_import.clone();
    }
    if let Some(mount) = &cli.modules_dir {
        config.modules_dir = Some(mount.clone());
    }
    if !cli.ignore_prefixes.is_empty() {
        config.ignore_prefixes = cli.ignore_prefixes.clone();
    }
    if cli.fs_path {
        config.fs_path = true;
    }
    if cli.fail_on_unresolved {
        config.fail_on_unresolved = true;
    }

    Ok(config)
}

/// Collect rewritable files: named files as-is, directories walked for
/// source extensions. Paths come back absolute and deduplicated in a
/// stable order.
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
                if entry.file_type().is_file() && has_source_extension(entry.path()) {
                    files.push(absolutize(entry.path()));
                }
            }
        } else {
            files.push(absolutize(path));
        }
    }
    files.sort();
    files.dedup();
    files
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        paths::normalize(path)
    } else {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        paths::normalize(&cwd.join(path))
    }
}
