//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Issue exactly one outbound call per `RequestSpec`
//! - Hand back status, headers and body without touching them
//!
//! # Design Decisions
//! - No retries and no caching; a failed call is reported once
//! - Timeouts are the reqwest client defaults
//! - Calls are logged by host and path only; query strings carry the token

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;

use crate::observability::metrics;
use crate::upstream::request::{Payload, RequestSpec, UpstreamResponse};
use crate::upstream::UpstreamError;

const USER_AGENT: &str = concat!("bff-proxy/", env!("CARGO_PKG_VERSION"));

/// Performs outbound calls.
///
/// Handlers only see this trait, so tests can substitute a recorder.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, spec: RequestSpec) -> Result<UpstreamResponse, UpstreamError>;
}

/// reqwest-backed forwarder sharing one connection pool.
#[derive(Clone)]
pub struct HttpForwarder {
    client: Client,
}

impl HttpForwarder {
    pub fn new() -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client (e.g. one built with `no_proxy` for tests).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, spec: RequestSpec) -> Result<UpstreamResponse, UpstreamError> {
        let target = spec.log_target();
        let host = spec.url.host_str().unwrap_or("-").to_string();
        let start = Instant::now();

        tracing::debug!(method = %spec.method, upstream = %target, "Forwarding request");

        let mut builder = self.client.request(spec.method, spec.url);
        for (name, value) in &spec.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &spec.payload {
            Payload::Empty => builder,
            Payload::Query(pairs) => builder.query(pairs),
            Payload::Json(body) => builder.json(body),
        };

        let result = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>(UpstreamResponse { status, headers, body })
        }
        .await;

        match result {
            Ok(response) => {
                metrics::record_upstream(&host, response.status.as_str(), start);
                tracing::debug!(
                    upstream = %target,
                    status = %response.status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                Ok(response)
            }
            Err(e) => {
                metrics::record_upstream(&host, "error", start);
                tracing::error!(upstream = %target, error = %e, "Upstream error");
                Err(UpstreamError::Request(e))
            }
        }
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, spec: RequestSpec) -> Result<UpstreamResponse, UpstreamError> {
        self.send(spec).await
    }
}
