//! Stackflow - deployment profile resolution for Compose stacks
//!
//! This crate combines an environment's partial compose documents into one
//! effective deployment profile, resolves `${NAME}` environment references
//! in the rendered output, and prepares the process environment for a
//! selected deployment target. The merge and rendering core lives in the
//! `stackflow-resolve` crate; this crate owns config location, profile
//! assembly, and the CLI.

pub mod config;
pub mod error;
pub mod profile;
pub mod remote;

pub use config::{AppConfig, ConfigLocator, EnvOptions, RemoteConfig};
pub use error::StackflowError;
pub use profile::{Profile, ProfileSource};
pub use remote::RemoteEnv;
