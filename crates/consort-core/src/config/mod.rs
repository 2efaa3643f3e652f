//! Configuration types for Consort.
//!
//! A configuration file holds a single `jwt` section describing the local
//! application (name, id, secret, token lifetime) and the table of parties
//! whose tokens it accepts:
//!
//! ```yaml
//! jwt:
//!   app_name: Log App
//!   app_id: log_app
//!   secret_env: LOG_APP_SECRET
//!   ttl: 300
//!   parties:
//!     my_app: [my_app, "http://my-app.local.vn/", secret_key_of_my_app, 300]
//!     log_app:
//!       app_id: log_app
//!       url: "http://log.local.vn/"
//!       secret: secret_key_of_log_app
//!       ttl: 300
//! ```

pub mod party;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use party::{DEFAULT_TTL, PartyRecord, Secret};

/// Complete Consort configuration loaded from a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsortConfig {
    /// Token issuance and trust settings.
    pub jwt: JwtConfig,
}

/// Identity of the local application and the parties it trusts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Human-readable application name. Slugified into the `iss` claim.
    #[serde(default)]
    pub app_name: String,

    /// Application id carried in the `jti` header of issued tokens.
    #[serde(default)]
    pub app_id: String,

    /// Secret used to sign issued tokens.
    #[serde(default)]
    pub secret: Secret,

    /// Environment variable holding the secret, used when `secret` is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_env: Option<String>,

    /// Lifetime of issued tokens, in seconds.
    #[serde(default = "party::default_ttl")]
    pub ttl: u64,

    /// Trusted parties keyed by app id.
    #[serde(default)]
    pub parties: BTreeMap<String, PartyRecord>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new("Application", "app_id", "secret_key", DEFAULT_TTL)
            .with_self_party("http://localhost")
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsortConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load a file, resolve the secret from the environment and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.jwt.resolve_secret();
        config.jwt.validate()?;
        Ok(config)
    }
}

impl JwtConfig {
    /// Create a configuration for an application that trusts nobody yet.
    pub fn new(
        app_name: impl Into<String>,
        app_id: impl Into<String>,
        secret: impl Into<Secret>,
        ttl: u64,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            app_id: app_id.into(),
            secret: secret.into(),
            secret_env: None,
            ttl,
            parties: BTreeMap::new(),
        }
    }

    /// Add a trusted party, replacing any record with the same app id.
    pub fn with_party(mut self, party: PartyRecord) -> Self {
        self.parties.insert(party.app_id.clone(), party);
        self
    }

    /// Add the local application itself to the parties table.
    pub fn with_self_party(self, url: impl Into<String>) -> Self {
        let own = PartyRecord::new(self.app_id.clone(), url, self.secret.clone(), self.ttl);
        self.with_party(own)
    }

    /// Get a party by app id.
    pub fn party(&self, app_id: &str) -> Option<&PartyRecord> {
        self.parties.get(app_id)
    }

    /// Fill an empty `secret` from `secret_env` when that variable is set.
    pub fn resolve_secret(&mut self) {
        if !self.secret.is_empty() {
            return;
        }

        if let Some(env_var) = &self.secret_env {
            if let Ok(value) = std::env::var(env_var) {
                self.secret = Secret::from(value.trim());
            }
        }
    }

    /// Structural checks on the parties table.
    ///
    /// The local application is not required to list itself; tokens it issues
    /// are then only verifiable by other parties.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, party) in &self.parties {
            if key != &party.app_id {
                return Err(ConfigError::Config(format!(
                    "party entry '{}' declares app_id '{}'",
                    key, party.app_id
                )));
            }
            if party.secret.is_empty() {
                return Err(ConfigError::Config(format!(
                    "party '{}' has an empty secret",
                    key
                )));
            }
        }
        Ok(())
    }
}
