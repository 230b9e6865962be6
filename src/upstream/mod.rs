//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Validated input + StaticCredentials
//!     → request.rs (RequestSpec: url, method, headers, query/body)
//!     → client.rs (Forwarder: one outbound call)
//!     → UpstreamResponse (status, headers, body)
//! ```

pub mod client;
pub mod credentials;
pub mod request;

use thiserror::Error;

pub use client::{Forwarder, HttpForwarder};
pub use credentials::{StaticCredentials, CLIENT_SRC};
pub use request::{endpoint, is_dot_segment, Payload, RequestSpec, UpstreamResponse};

/// Errors raised while building or issuing an outbound call.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or protocol failure from the HTTP client.
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A configured base URL cannot take path segments.
    #[error("invalid upstream base URL {base}: {reason}")]
    InvalidBase { base: String, reason: String },

    /// A path segment that would be resolved instead of appended.
    #[error("path segment {0:?} cannot be forwarded")]
    InvalidSegment(String),
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use axum::body::Bytes;
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
    use async_trait::async_trait;

    use super::*;

    /// Forwarder that records every spec and answers with a canned response.
    #[derive(Clone)]
    pub struct RecordingForwarder {
        pub calls: Arc<Mutex<Vec<RequestSpec>>>,
        status: StatusCode,
        content_type: &'static str,
        body: Bytes,
    }

    impl RecordingForwarder {
        pub fn replying(status: StatusCode, content_type: &'static str, body: &'static str) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                status,
                content_type,
                body: Bytes::from_static(body.as_bytes()),
            }
        }

        pub fn ok_json(body: &'static str) -> Self {
            Self::replying(StatusCode::OK, "application/json; charset=utf-8", body)
        }

        pub fn calls(&self) -> Vec<RequestSpec> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Forwarder for RecordingForwarder {
        async fn forward(&self, spec: RequestSpec) -> Result<UpstreamResponse, UpstreamError> {
            self.calls.lock().unwrap().push(spec);
            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type));
            Ok(UpstreamResponse {
                status: self.status,
                headers,
                body: self.body.clone(),
            })
        }
    }

    /// Forwarder whose every call fails the way an unreachable host does.
    pub struct FailingForwarder;

    #[async_trait]
    impl Forwarder for FailingForwarder {
        async fn forward(&self, spec: RequestSpec) -> Result<UpstreamResponse, UpstreamError> {
            Err(UpstreamError::InvalidBase {
                base: spec.url.to_string(),
                reason: "unreachable".to_string(),
            })
        }
    }

    /// Forwarder that answers only after `delay`.
    pub struct SlowForwarder {
        pub delay: std::time::Duration,
    }

    #[async_trait]
    impl Forwarder for SlowForwarder {
        async fn forward(&self, _spec: RequestSpec) -> Result<UpstreamResponse, UpstreamError> {
            tokio::time::sleep(self.delay).await;
            Ok(UpstreamResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: Bytes::new(),
            })
        }
    }
}
