//! Error types for the resolution core.

use thiserror::Error;

/// Errors produced by document ingestion and template rendering.
///
/// Both operations fail fast with no partial result; there is nothing
/// transient here to retry.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A `${NAME}` reference has no entry in the environment lookup.
    ///
    /// Never defaulted to an empty string: a missing variable means a
    /// misconfigured deployment environment.
    #[error("variable '{name}' is not defined in the environment; cannot render")]
    UndefinedVariable { name: String },

    /// A document contains a value the merge engine cannot address.
    #[error("unsupported value at {path}: {reason}")]
    UnsupportedValue { path: String, reason: String },

    /// YAML parse or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_variable_display() {
        let err = ResolveError::UndefinedVariable {
            name: "DOCKER_HOST".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable 'DOCKER_HOST' is not defined in the environment; cannot render"
        );
    }

    #[test]
    fn test_unsupported_value_display() {
        let err = ResolveError::UnsupportedValue {
            path: "services.web".to_string(),
            reason: "mapping keys must be strings".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported value at services.web: mapping keys must be strings"
        );
    }
}
