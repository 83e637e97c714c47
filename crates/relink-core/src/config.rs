use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the conventional module directory searched for bare specifiers.
pub const DEFAULT_RESOLVE_DIRECTORY: &str = "node_modules";

/// Default virtual mount for dependency-root rewrites when `modulesDir`
/// is unset.
pub const DEFAULT_MODULES_MOUNT: &str = "/node_modules";

/// Configuration for one transformation run.
///
/// Created once, immutable thereafter; the resolver only reads it. Field
/// names on the serde wire are camelCase, so a JSON config file uses the
/// option names exactly as documented (`resolveDirectories`,
/// `alwaysRootImport`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Ordered list of module-directory names probed for bare specifiers.
    /// At each ascent level every name is scanned in order before moving
    /// to the parent directory.
    pub resolve_directories: Vec<String>,

    /// Glob patterns selecting packages resolved from [`Config::root_base_dir`]
    /// instead of the importing file's own directory.
    pub always_root_import: Vec<String>,

    /// Glob patterns excluded from `always_root_import`. A match here wins
    /// over any `always_root_import` match for the same package name.
    pub never_root_import: Vec<String>,

    /// Fixed search root for root imports, and the base the module
    /// directories are anchored under. Captured explicitly (never read from
    /// process state at resolve time) so resolution is reproducible.
    pub root_base_dir: PathBuf,

    /// Virtual mount path or full URL substituted for the module root when
    /// a top-level file imports a dependency. Unset means the conventional
    /// mount (`/node_modules` for the default resolve directory).
    pub modules_dir: Option<String>,

    /// Emit raw filesystem paths instead of mount-relative specifiers for
    /// module-directory hits.
    pub fs_path: bool,

    /// Literal specifier prefixes exempted from all processing.
    pub ignore_prefixes: Vec<String>,

    /// Escalate unresolved specifiers to a fatal error instead of a logged
    /// passthrough.
    pub fail_on_unresolved: bool,

    /// Ordering contract with multi-pass hosts: apply this transform after
    /// other passes that may inject new import statements. The resolver
    /// itself does not act on this.
    pub process_at_program_exit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolve_directories: vec![DEFAULT_RESOLVE_DIRECTORY.to_string()],
            always_root_import: Vec::new(),
            never_root_import: Vec::new(),
            root_base_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            modules_dir: None,
            fs_path: false,
            ignore_prefixes: Vec::new(),
            fail_on_unresolved: false,
            process_at_program_exit: false,
        }
    }
}

impl Config {
    /// Create a config rooted at the given base directory.
    #[must_use]
    pub fn new(root_base_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_base_dir: root_base_dir.into(),
            ..Default::default()
        }
    }

    /// Load a config from a JSON file with camelCase option names.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the module-directory names to probe.
    #[must_use]
    pub fn with_resolve_directories(mut self, dirs: Vec<String>) -> Self {
        self.resolve_directories = dirs;
        self
    }

    /// Set the root-import allow patterns.
    #[must_use]
    pub fn with_always_root_import(mut self, patterns: Vec<String>) -> Self {
        self.always_root_import = patterns;
        self
    }

    /// Set the root-import deny patterns.
    #[must_use]
    pub fn with_never_root_import(mut self, patterns: Vec<String>) -> Self {
        self.never_root_import = patterns;
        self
    }

    /// Set the virtual mount path or URL.
    #[must_use]
    pub fn with_modules_dir(mut self, mount: impl Into<String>) -> Self {
        self.modules_dir = Some(mount.into());
        self
    }

    /// Emit raw filesystem paths for module-directory hits.
    #[must_use]
    pub fn with_fs_path(mut self, fs_path: bool) -> Self {
        self.fs_path = fs_path;
        self
    }

    /// Set the ignored specifier prefixes.
    #[must_use]
    pub fn with_ignore_prefixes(mut self, prefixes: Vec<String>) -> Self {
        self.ignore_prefixes = prefixes;
        self
    }

    /// Escalate unresolved specifiers to errors.
    #[must_use]
    pub fn with_fail_on_unresolved(mut self, fail: bool) -> Self {
        self.fail_on_unresolved = fail;
        self
    }
}
