//! CLI command implementations for Consort.

pub mod identity;
pub mod secret;
pub mod token;

use anyhow::Context;
use consort_core::{ConsortConfig, JwtConfig};
use std::fs;
use std::path::Path;

/// Load, resolve and validate the `jwt` section of a configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JwtConfig> {
    let config = ConsortConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::debug!(
        config = %path.display(),
        app_id = %config.jwt.app_id,
        parties = config.jwt.parties.len(),
        "Loaded configuration"
    );
    Ok(config.jwt)
}

/// Read a token given inline or as a path to a file containing it.
pub fn read_token(token: String) -> anyhow::Result<String> {
    let path = Path::new(&token);
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read token from {}", path.display()))?;
        return Ok(content.trim().to_string());
    }
    Ok(token.trim().to_string())
}
