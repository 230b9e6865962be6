//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, timeout, body limit, headers)
//! - Record per-route request metrics
//! - Serve on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{BffConfig, UpstreamConfig};
use crate::http::request::{propagate_request_id_layer, request_id_of, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routes;
use crate::security::{headers::with_security_headers, limits::body_limit_layer};
use crate::upstream::{Forwarder, HttpForwarder, StaticCredentials, UpstreamError};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<StaticCredentials>,
    pub upstreams: Arc<UpstreamConfig>,
    pub forwarder: Arc<dyn Forwarder>,
}

impl AppState {
    pub fn new(config: &BffConfig, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            credentials: Arc::new(config.credentials.clone()),
            upstreams: Arc::new(config.upstreams.clone()),
            forwarder,
        }
    }
}

/// HTTP server for the BFF.
pub struct HttpServer {
    router: Router,
    config: BffConfig,
}

impl HttpServer {
    /// Create a server forwarding through a fresh reqwest client.
    pub fn new(config: BffConfig) -> Result<Self, UpstreamError> {
        let forwarder = Arc::new(HttpForwarder::new()?);
        Ok(Self::with_forwarder(config, forwarder))
    }

    /// Create a server with a caller-supplied forwarder.
    pub fn with_forwarder(config: BffConfig, forwarder: Arc<dyn Forwarder>) -> Self {
        let state = AppState::new(&config, forwarder);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &BffConfig, state: AppState) -> Router {
        let router = routes::router()
            .with_state(state)
            .layer(body_limit_layer(&config.security))
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id_of(request),
                )
            }))
            .layer(set_request_id_layer());

        if config.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &BffConfig {
        &self.config
    }
}

/// Count and time every request by its route template.
async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!(route = %route, status = %status, "Request failed");
    }
    metrics::record_request(&route, &method, status.as_u16(), start);
    response
}
