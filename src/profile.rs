//! Effective deployment profiles.
//!
//! A profile is the merge of an environment's compose documents in
//! precedence order, with per-source provenance captured alongside the
//! merged result. The profile is serialized to YAML and rendered against
//! an environment lookup before it is written out; a failed render writes
//! nothing.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use stackflow_resolve::{from_yaml_str, merge_sourced, to_yaml_string, EnvLookup, SourceMap};

use crate::error::StackflowError;

/// A contributing compose document with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSource {
    /// File the document was read from; also the provenance tag.
    pub path: String,

    /// SHA-256 digest of the raw file bytes.
    pub digest: String,
}

/// Merged deployment profile for one environment.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Target environment name.
    pub environment: String,

    /// Project name; combined with the environment for the profile name.
    pub project_name: String,

    /// When this profile was assembled.
    pub created_at: DateTime<Utc>,

    /// The merged document.
    pub document: Value,

    /// Contributing sources in precedence order.
    pub sources: Vec<ProfileSource>,

    /// Path -> source attribution for the merged document.
    pub provenance: SourceMap<String>,
}

impl Profile {
    /// Assemble a profile by merging `files` in order (lowest precedence
    /// first). Inputs are read and parsed here; the merge itself never
    /// touches the filesystem.
    pub fn assemble(
        environment: &str,
        project_name: &str,
        files: &[PathBuf],
    ) -> Result<Self, StackflowError> {
        let mut documents: Vec<(String, Value)> = Vec::with_capacity(files.len());
        let mut sources = Vec::with_capacity(files.len());

        for path in files {
            if !path.exists() {
                return Err(StackflowError::NoSuchConfig { path: path.clone() });
            }
            let bytes = fs::read(path)?;

            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            let digest = hex::encode(hasher.finalize());

            let text = String::from_utf8(bytes).map_err(|e| {
                StackflowError::Validation(format!("{}: invalid UTF-8: {}", path.display(), e))
            })?;
            let document = from_yaml_str(&text)?;

            let tag = path.display().to_string();
            sources.push(ProfileSource {
                path: tag.clone(),
                digest,
            });
            documents.push((tag, document));
        }

        let (document, provenance) = merge_sourced(&documents);

        Ok(Self {
            environment: environment.to_string(),
            project_name: project_name.to_string(),
            created_at: Utc::now(),
            document,
            sources,
            provenance,
        })
    }

    /// Profile name: `{environment}-{project_name}`.
    pub fn env_name(&self) -> String {
        format!("{}-{}", self.environment, self.project_name)
    }

    /// Serialize the merged document to YAML, unrendered.
    pub fn to_yaml(&self) -> Result<String, StackflowError> {
        Ok(to_yaml_string(&self.document)?)
    }

    /// Serialize and resolve `${NAME}` references against `lookup`.
    pub fn rendered(&self, lookup: &impl EnvLookup) -> Result<String, StackflowError> {
        let text = self.to_yaml()?;
        Ok(stackflow_resolve::render(&text, lookup)?)
    }

    /// Write the rendered profile to `<dir>/<env_name>.yml` and return the
    /// written path. Nothing is written when rendering fails.
    pub fn write(
        &self,
        dir: &Path,
        lookup: &impl EnvLookup,
    ) -> Result<PathBuf, StackflowError> {
        let rendered = self.rendered(lookup)?;
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.yml", self.env_name()));
        fs::write(&path, rendered)?;
        Ok(path)
    }

    /// Provenance as (path, source) rows, ordered by path.
    pub fn provenance_rows(&self) -> Vec<(String, String)> {
        self.provenance
            .iter()
            .map(|(path, source)| (path.to_string(), source.clone()))
            .collect()
    }

    /// JSON description of the profile for `--json` output.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let out = serde_json::json!({
            "environment": self.environment,
            "project_name": self.project_name,
            "created_at": self.created_at,
            "config": self.document,
            "sources": self.sources,
        });
        serde_json::to_string_pretty(&out)
    }
}
