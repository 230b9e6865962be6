//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::BffConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that override the credentials section.
pub const ENV_UID: &str = "BFF_UID";
pub const ENV_DEVICE_ID: &str = "BFF_DEVICE_ID";
pub const ENV_TOKEN: &str = "BFF_TOKEN";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read and parse a TOML file without overrides or validation.
pub fn read_config(path: &Path) -> Result<BffConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply environment overrides to an already-parsed config and validate it.
pub fn finalize(mut config: BffConfig) -> Result<BffConfig, ConfigError> {
    let applied = apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    if !applied.is_empty() {
        tracing::info!(variables = ?applied, "Credentials overridden from environment");
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace credential fields with values from `lookup` when present.
///
/// Returns the variables that were applied.
pub fn apply_env_overrides<F>(config: &mut BffConfig, lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = Vec::new();
    let credentials = &mut config.credentials;
    for (key, slot) in [
        (ENV_UID, &mut credentials.uid),
        (ENV_DEVICE_ID, &mut credentials.device_id),
        (ENV_TOKEN, &mut credentials.token),
    ] {
        if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
            *slot = value;
            applied.push(key);
        }
    }
    applied
}
