//! Process-wide static credentials.

use serde::{Deserialize, Serialize};

/// Value sent in every `src` parameter and `X-Juejin-Src` header.
pub const CLIENT_SRC: &str = "web";

/// Fixed identity attached to every outbound call.
///
/// Loaded once at startup and shared read-only; nothing mutates it after the
/// config is validated.
#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StaticCredentials {
    pub uid: String,
    pub device_id: String,
    pub token: String,
}

impl StaticCredentials {
    pub fn new(uid: impl Into<String>, device_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            device_id: device_id.into(),
            token: token.into(),
        }
    }

    /// Credentials as query parameters, for services that authenticate by query string.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("uid", self.uid.clone()),
            ("device_id", self.device_id.clone()),
            ("token", self.token.clone()),
        ]
    }

    /// Headers understood by the like service.
    pub fn juejin_headers(&self) -> [(&'static str, String); 4] {
        [
            ("X-Juejin-Src", CLIENT_SRC.to_string()),
            ("X-Juejin-Client", self.device_id.clone()),
            ("X-Juejin-Token", self.token.clone()),
            ("X-Juejin-Uid", self.uid.clone()),
        ]
    }

    /// Headers understood by the persisted-query gateway.
    pub fn legacy_headers(&self) -> [(&'static str, String); 4] {
        [
            ("X-Agent", "Juejin/Web".to_string()),
            ("X-Legacy-Device-Id", self.device_id.clone()),
            ("X-Legacy-Token", self.token.clone()),
            ("X-Legacy-Uid", self.uid.clone()),
        ]
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("uid", &self.uid)
            .field("device_id", &self.device_id)
            .field("token", &"<redacted>")
            .finish()
    }
}
