//! Configuration validation.
//!
//! Semantic checks only; serde handles syntax. Returns every error found,
//! not just the first, so a broken config file can be fixed in one pass.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::BffConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("credentials.{0} must not be empty")]
    EmptyCredential(&'static str),

    #[error("upstreams.{name} is not a valid base URL: {url}")]
    InvalidUpstreamUrl { name: &'static str, url: String },

    #[error("listener.bind_address is not a socket address: {0}")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &BffConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let credentials = &config.credentials;
    for (name, value) in [
        ("uid", &credentials.uid),
        ("device_id", &credentials.device_id),
        ("token", &credentials.token),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::EmptyCredential(name));
        }
    }

    for (name, base) in config.upstreams.bases() {
        let valid = Url::parse(base)
            .map(|url| !url.cannot_be_a_base() && url.host_str().is_some())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidUpstreamUrl {
                name,
                url: base.to_string(),
            });
        }
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
