//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the BFF.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::upstream::StaticCredentials;

/// Root configuration for the backend-for-frontend proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BffConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Fixed identity attached to every upstream call.
    pub credentials: StaticCredentials,

    /// Upstream service base URLs.
    pub upstreams: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Base URLs of the upstream microservices.
///
/// Only scheme, host and an optional path prefix belong here; endpoint paths
/// are appended per route.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// User profile service (`get_multi_user`).
    pub user_api: String,

    /// Notification service.
    pub notification_api: String,

    /// Follow graph service.
    pub follow_api: String,

    /// Article like service.
    pub like_api: String,

    /// Persisted-query gateway used for recommendation cards.
    pub query_api: String,

    /// Persisted query id of the recommendation card query.
    pub recommend_query_id: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            user_api: "https://lccro-api-ms.juejin.im".to_string(),
            notification_api: "https://ufp-api-ms.juejin.im".to_string(),
            follow_api: "https://follow-api-ms.juejin.im".to_string(),
            like_api: "https://user-like-wrapper-ms.juejin.im".to_string(),
            query_api: "https://web-api.juejin.im".to_string(),
            recommend_query_id: "b031bf7f8b17b1a173a38807136cc20e".to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Every base URL paired with its config key, for validation and logging.
    pub fn bases(&self) -> [(&'static str, &str); 5] {
        [
            ("user_api", &self.user_api),
            ("notification_api", &self.notification_api),
            ("follow_api", &self.follow_api),
            ("like_api", &self.like_api),
            ("query_api", &self.query_api),
        ]
    }

    /// Point every upstream at the same base. Used for local mocks.
    pub fn all_at(base: &str) -> Self {
        Self {
            user_api: base.to_string(),
            notification_api: base.to_string(),
            follow_api: base.to_string(),
            like_api: base.to_string(),
            query_api: base.to_string(),
            ..Self::default()
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: BffConfig = toml::from_str(
            r#"
            [credentials]
            uid = "u1"
            device_id = "d1"
            token = "t1"
            "#,
        )
        .unwrap();

        assert_eq!(config.credentials.uid, "u1");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstreams.like_api, "https://user-like-wrapper-ms.juejin.im");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_upstream_section() {
        let config: BffConfig = toml::from_str(
            r#"
            [upstreams]
            follow_api = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstreams.follow_api, "http://127.0.0.1:9000");
        assert_eq!(config.upstreams.user_api, "https://lccro-api-ms.juejin.im");
    }

    #[test]
    fn test_all_at_keeps_query_id() {
        let upstreams = UpstreamConfig::all_at("http://mock");
        assert!(upstreams.bases().iter().all(|(_, base)| *base == "http://mock"));
        assert_eq!(upstreams.recommend_query_id, UpstreamConfig::default().recommend_query_id);
    }
}
