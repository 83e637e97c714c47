use std::path::PathBuf;
use thiserror::Error;

/// Core error type for relink operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No candidate file exists for the specifier. Only surfaced as an
    /// error when `failOnUnresolved` is set; otherwise the orchestrator
    /// reports a non-fatal [`crate::Diagnostic`] and keeps the specifier.
    #[error("cannot resolve '{specifier}' from '{}'", .source_file.display())]
    Unresolved {
        specifier: String,
        source_file: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read config at {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
