//! Outbound request description and upstream response.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::upstream::UpstreamError;

/// What to send alongside the URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No query string and no body.
    Empty,
    /// Query parameters, in send order.
    Query(Vec<(String, String)>),
    /// JSON request body.
    Json(Value),
}

/// A fully built outbound request.
///
/// Built fresh per inbound request and dropped once the call completes.
/// Equality is structural, so two builds from the same inputs compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub url: Url,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub payload: Payload,
}

impl RequestSpec {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            url,
            method,
            headers: BTreeMap::new(),
            payload: Payload::Empty,
        }
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Append query parameters, keeping insertion order.
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut existing = match self.payload {
            Payload::Query(existing) => existing,
            _ => Vec::new(),
        };
        existing.extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self.payload = Payload::Query(existing);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// Look up a query parameter by name.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        match &self.payload {
            Payload::Query(pairs) => pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Host and path only; never includes query values, which carry the token.
    pub fn log_target(&self) -> String {
        format!("{}{}", self.url.host_str().unwrap_or("-"), self.url.path())
    }
}

/// Status, headers and body returned by an upstream, untouched.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl UpstreamResponse {
    pub fn content_type(&self) -> Option<&axum::http::HeaderValue> {
        self.headers.get(axum::http::header::CONTENT_TYPE)
    }
}

/// Join path segments onto an upstream base URL.
///
/// Segments are percent-encoded. `.` and `..` are refused because the URL
/// parser would resolve them against the path instead of encoding them.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url, UpstreamError> {
    if let Some(segment) = segments.iter().find(|s| is_dot_segment(s)) {
        return Err(UpstreamError::InvalidSegment(segment.to_string()));
    }
    let mut url = Url::parse(base).map_err(|e| UpstreamError::InvalidBase {
        base: base.to_string(),
        reason: e.to_string(),
    })?;
    url.path_segments_mut()
        .map_err(|_| UpstreamError::InvalidBase {
            base: base.to_string(),
            reason: "cannot be a base".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// True for segments the URL parser treats as relative references.
pub fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}
