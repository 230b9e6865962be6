//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;

use bff_proxy::config::{BffConfig, UpstreamConfig};
use bff_proxy::upstream::{HttpForwarder, StaticCredentials};
use bff_proxy::{HttpServer, Shutdown};

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    /// Decoded query parameter.
    #[allow(dead_code)]
    pub fn query(&self, name: &str) -> Option<String> {
        url::form_urlencoded::parse(self.uri.query().unwrap_or("").as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[allow(dead_code)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A programmable upstream that records every request it receives.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockUpstream {
    /// Start on an ephemeral port, answering every request with the same reply.
    pub async fn start(status: StatusCode, content_type: &'static str, body: &'static str) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();

        let app = Router::new().fallback(move |method: Method, uri: Uri, headers: HeaderMap, body_in: Bytes| {
            let sink = sink.clone();
            async move {
                sink.lock().unwrap().push(Captured {
                    method,
                    uri,
                    headers,
                    body: body_in,
                });
                (status, [("content-type", content_type)], body).into_response()
            }
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, captured }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

/// A running proxy pointed at a mock upstream.
pub struct RunningProxy {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub fn test_credentials() -> StaticCredentials {
    StaticCredentials::new("it-uid", "it-device", "it-token")
}

/// Start the proxy on an ephemeral port with every upstream at `upstream_base`.
pub async fn start_proxy(upstream_base: &str) -> RunningProxy {
    let mut config = BffConfig::default();
    config.credentials = test_credentials();
    config.upstreams = UpstreamConfig::all_at(upstream_base);
    config.observability.metrics_enabled = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let server = HttpServer::with_forwarder(config, Arc::new(HttpForwarder::with_client(client)));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    RunningProxy { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
