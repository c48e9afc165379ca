//! App config (stackflow.yml) parsing and validation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigLocator;
use crate::error::StackflowError;

/// Per-environment remote endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Docker daemon endpoint for this environment
    /// (e.g. "ssh://deploy@prod-manager").
    #[serde(default)]
    pub docker_host: Option<String>,
}

/// Per-environment option toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvOptions {
    /// Allow profile writes from a dirty working copy.
    #[serde(default)]
    pub dirty_working_copy_okay: bool,
}

/// Parsed stackflow config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Profile name -> ordered compose documents, lowest precedence first.
    #[serde(default)]
    pub profiles: BTreeMap<String, Vec<PathBuf>>,

    /// Environment name -> remote endpoint.
    #[serde(default)]
    pub remotes: BTreeMap<String, RemoteConfig>,

    /// Environment name -> option toggles.
    #[serde(default)]
    pub options: BTreeMap<String, EnvOptions>,
}

impl AppConfig {
    /// Load the config file if present; a missing file is not an error.
    pub fn load(locator: &ConfigLocator) -> Result<Option<Self>, StackflowError> {
        if !locator.exists() {
            return Ok(None);
        }
        Ok(Some(Self::from_file(locator.path())?))
    }

    /// Load and parse config from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, StackflowError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse config from a YAML string.
    pub fn from_str(s: &str) -> Result<Self, StackflowError> {
        let config: AppConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Compose documents for a named profile, lowest precedence first.
    pub fn profile_files(&self, name: &str) -> Result<&[PathBuf], StackflowError> {
        self.profiles
            .get(name)
            .map(|files| files.as_slice())
            .ok_or_else(|| StackflowError::NoSuchProfile {
                name: name.to_string(),
            })
    }

    /// Whether `environment` tolerates a dirty working copy.
    pub fn dirty_working_copy_okay(&self, environment: &str) -> bool {
        self.options
            .get(environment)
            .map(|options| options.dirty_working_copy_okay)
            .unwrap_or(false)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), StackflowError> {
        for (name, files) in &self.profiles {
            if files.is_empty() {
                return Err(StackflowError::Validation(format!(
                    "profile '{}' lists no compose files",
                    name
                )));
            }
        }
        Ok(())
    }
}
