//! Store selection: which endpoint, service and environment to talk to.

use serde::{Deserialize, Serialize};

use crate::error::{EntityError, Result};
use crate::query::Dialect;

pub const ENV_ENDPOINT: &str = "RDF_ENTITY_ENDPOINT";
pub const ENV_SERVICE: &str = "RDF_ENTITY_SERVICE";
pub const ENV_ENVIRONMENT: &str = "RDF_ENTITY_ENV";
pub const ENV_TIMEOUT_SECS: &str = "RDF_ENTITY_TIMEOUT_SECS";
pub const ENV_AUTH_TOKEN: &str = "RDF_ENTITY_AUTH_TOKEN";
pub const ENV_DIALECT: &str = "RDF_ENTITY_DIALECT";

const SERVICE_PLACEHOLDER: &str = "{service}";

/// Connection settings for a remote triple store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Query endpoint URL; `{service}` is replaced by [`StoreConfig::service_name`].
    pub endpoint: String,
    pub service: String,
    pub environment: String,
    pub timeout_secs: u64,
    pub auth_token: Option<String>,
    #[serde(default)]
    pub dialect: Dialect,
}

impl StoreConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            service: "metamodl".to_string(),
            environment: "development".to_string(),
            timeout_secs: 30,
            auth_token: None,
            dialect: Dialect::default(),
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Per-environment service name, e.g. `metamodl_production`.
    pub fn service_name(&self) -> String {
        format!("{}_{}", self.service, self.environment)
    }

    pub fn query_url(&self) -> String {
        self.endpoint.replace(SERVICE_PLACEHOLDER, &self.service_name())
    }

    /// Load from the `RDF_ENTITY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = get(ENV_ENDPOINT)
            .ok_or_else(|| EntityError::ConfigError(format!("{} is not set", ENV_ENDPOINT)))?;
        let mut config = StoreConfig::new(endpoint);

        if let Some(service) = get(ENV_SERVICE) {
            config.service = service;
        }
        if let Some(environment) = get(ENV_ENVIRONMENT) {
            config.environment = environment;
        }
        if let Some(timeout) = get(ENV_TIMEOUT_SECS) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                EntityError::ConfigError(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, timeout
                ))
            })?;
        }
        config.auth_token = get(ENV_AUTH_TOKEN);
        if let Some(dialect) = get(ENV_DIALECT) {
            config.dialect = dialect.parse()?;
        }

        tracing::debug!(
            service = %config.service_name(),
            url = %config.query_url(),
            "loaded store configuration"
        );
        Ok(config)
    }
}
