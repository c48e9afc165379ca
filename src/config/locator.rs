//! Config file location.
//!
//! Resolved once at program entry, from the CLI flag when given, otherwise
//! from the `STACKFLOW_CONFIG_FILE` override, otherwise the default
//! location. Collaborators receive the locator as an argument; nothing in
//! this crate reads the override after startup.

use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_FILE_VAR: &str = "STACKFLOW_CONFIG_FILE";

/// Default config file location relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "compose/stackflow.yml";

/// Resolved location of the stackflow config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocator {
    path: PathBuf,
}

impl ConfigLocator {
    /// Resolve from the process environment, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) if !path.is_empty() => Self {
                path: PathBuf::from(path),
            },
            _ => Self {
                path: PathBuf::from(DEFAULT_CONFIG_FILE),
            },
        }
    }

    /// Use an explicit path (CLI `--config`).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the config file.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
