//! Request limits.
//!
//! Inbound bodies are tiny JSON objects; anything larger than the configured
//! limit is rejected with 413 before a handler runs.

use tower_http::limit::RequestBodyLimitLayer;

use crate::config::SecurityConfig;

pub fn body_limit_layer(config: &SecurityConfig) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(config.max_body_size)
}
