//! Remote environment setup.
//!
//! Computes the process-environment assignments for a selected deployment
//! target. Assignments are plain data until `apply` is called at the CLI
//! edge; no connection is made here.

use crate::config::AppConfig;

/// Variable carrying the Docker daemon endpoint.
pub const DOCKER_HOST_VAR: &str = "DOCKER_HOST";

/// Environment assignments for a deployment target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteEnv {
    /// Key/value pairs to set, in application order.
    pub assignments: Vec<(String, String)>,
}

impl RemoteEnv {
    /// Compute assignments for `environment` from the app config.
    ///
    /// An environment without a configured remote yields no assignments.
    pub fn for_environment(config: &AppConfig, environment: &str) -> Self {
        let mut assignments = Vec::new();
        if let Some(remote) = config.remotes.get(environment) {
            if let Some(host) = &remote.docker_host {
                assignments.push((DOCKER_HOST_VAR.to_string(), host.clone()));
            }
        }
        Self { assignments }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Set the assignments in this process's environment.
    pub fn apply(&self) {
        for (key, value) in &self.assignments {
            std::env::set_var(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_remote() -> AppConfig {
        AppConfig::from_str(
            "remotes:\n  prod:\n    docker_host: ssh://deploy@prod-manager\n  local: {}\n",
        )
        .unwrap()
    }

    #[test]
    fn test_remote_environment_sets_docker_host() {
        let env = RemoteEnv::for_environment(&config_with_remote(), "prod");
        assert_eq!(
            env.assignments,
            vec![(
                DOCKER_HOST_VAR.to_string(),
                "ssh://deploy@prod-manager".to_string()
            )]
        );
    }

    #[test]
    fn test_remote_without_host_yields_nothing() {
        let env = RemoteEnv::for_environment(&config_with_remote(), "local");
        assert!(env.is_empty());
    }

    #[test]
    fn test_unknown_environment_yields_nothing() {
        let env = RemoteEnv::for_environment(&config_with_remote(), "staging");
        assert!(env.is_empty());
    }
}
