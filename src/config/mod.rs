//! Stackflow config file location and parsing.
//!
//! The config file names each environment's compose documents (in
//! precedence order), remote endpoints, and per-environment options. Its
//! location is resolved once at program entry and passed down explicitly.

mod locator;
mod settings;

pub use locator::{ConfigLocator, CONFIG_FILE_VAR, DEFAULT_CONFIG_FILE};
pub use settings::{AppConfig, EnvOptions, RemoteConfig};
