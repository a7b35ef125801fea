//! API configuration

use serde::Deserialize;

use domain_scoring::ScoringConfig;

/// Environment variable prefix, e.g. `FRAUD_API_PORT`
pub const ENV_PREFIX: &str = "FRAUD_API";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Largest number of claims accepted by one batch request
    pub max_batch_size: usize,
    /// Artifact locations and model bindings
    pub scoring: ScoringConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            max_batch_size: 500,
            scoring: ScoringConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// Nested keys use a double underscore, so
    /// `FRAUD_API_SCORING__ARTIFACT_DIR` sets `scoring.artifact_dir` and
    /// `FRAUD_API_SCORING__MODELS=rfc,lr` sets the model list.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_environment(Self::environment())
    }

    /// The environment source with this crate's prefix and separators
    pub fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("scoring.models")
            .try_parsing(true)
    }

    /// Loads configuration from an explicit environment source
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
