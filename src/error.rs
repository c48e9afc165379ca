//! Error types for stackflow operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by config loading, profile assembly, and environment
/// setup. Core resolution errors pass through unchanged.
#[derive(Debug, Error)]
pub enum StackflowError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found: {path}")]
    NoSuchConfig { path: PathBuf },

    #[error("no profile named '{name}' in config")]
    NoSuchProfile { name: String },

    #[error(transparent)]
    Resolve(#[from] stackflow_resolve::ResolveError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
