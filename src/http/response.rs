//! Response shaping.
//!
//! # Responsibilities
//! - Relay upstream bodies to the browser
//! - Mirror status and content type where the client needs them
//! - Reshape the recommendation-card payload into the `{s, d}` envelope
//!
//! # Design Decisions
//! - Bodies are passed through as bytes; only the card route parses JSON
//! - Card parse failures degrade to an empty envelope instead of an error

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::upstream::UpstreamResponse;

/// Cache policy of the recommendation-card route.
pub const RECOMMEND_CACHE_CONTROL: &str = "max-age=300";

/// `{s, d}` envelope returned by the recommendation-card route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardEnvelope {
    /// 1 when items were found, 0 otherwise.
    pub s: u8,
    pub d: Value,
}

impl CardEnvelope {
    pub fn empty() -> Self {
        Self {
            s: 0,
            d: Value::Array(Vec::new()),
        }
    }

    /// Pull `data.recommendationCard.items` out of an upstream body.
    pub fn from_upstream(body: &[u8]) -> Self {
        let parsed: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Recommendation payload is not JSON");
                return Self::empty();
            }
        };

        match parsed.pointer("/data/recommendationCard/items") {
            Some(items) if !items.is_null() => Self {
                s: 1,
                d: items.clone(),
            },
            _ => {
                tracing::debug!("Recommendation payload has no items");
                Self::empty()
            }
        }
    }
}

/// 200 with the upstream body; content type copied when the upstream set one.
pub fn relay_body(upstream: UpstreamResponse) -> Response {
    build(StatusCode::OK, upstream)
}

/// Upstream status, content type and body, verbatim.
pub fn mirror(upstream: UpstreamResponse) -> Response {
    build(upstream.status, upstream)
}

fn build(status: StatusCode, upstream: UpstreamResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body.clone()));
    *response.status_mut() = status;
    if let Some(content_type) = upstream.content_type() {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type.clone());
    }
    response
}

/// The card envelope as JSON, with the route's fixed cache policy.
pub fn card(upstream: UpstreamResponse) -> Response {
    let envelope = CardEnvelope::from_upstream(&upstream.body);
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(RECOMMEND_CACHE_CONTROL))],
        Json(envelope),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use axum::http::HeaderMap;
    use serde_json::json;

    fn upstream(status: StatusCode, content_type: Option<&'static str>, body: &'static str) -> UpstreamResponse {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        UpstreamResponse {
            status,
            headers,
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    async fn body_of(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap()
    }

    #[test]
    fn test_envelope_with_items() {
        let body = br#"{"data":{"recommendationCard":{"items":[{"id":1},{"id":2}]}}}"#;
        let envelope = CardEnvelope::from_upstream(body);
        assert_eq!(envelope.s, 1);
        assert_eq!(envelope.d, json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn test_envelope_keeps_empty_item_list() {
        let envelope = CardEnvelope::from_upstream(br#"{"data":{"recommendationCard":{"items":[]}}}"#);
        assert_eq!(envelope, CardEnvelope { s: 1, d: json!([]) });
    }

    #[test]
    fn test_envelope_defaults() {
        let bodies: [&[u8]; 5] = [
            b"not json",
            br#"{"data":null}"#,
            br#"{"data":{"recommendationCard":{}}}"#,
            br#"{"data":{"recommendationCard":{"items":null}}}"#,
            b"",
        ];
        for body in bodies {
            assert_eq!(CardEnvelope::from_upstream(body), CardEnvelope::empty());
        }
    }

    #[tokio::test]
    async fn test_relay_body_forces_ok() {
        let response = relay_body(upstream(StatusCode::ACCEPTED, Some("application/json"), "{\"a\":1}"));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_of(response).await, "{\"a\":1}");
    }

    #[tokio::test]
    async fn test_mirror_copies_status() {
        let response = mirror(upstream(StatusCode::NOT_FOUND, Some("text/plain"), "gone"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        assert_eq!(body_of(response).await, "gone");

        let response = mirror(upstream(StatusCode::CREATED, None, ""));
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[tokio::test]
    async fn test_card_sets_cache_control() {
        let response = card(upstream(StatusCode::OK, None, "garbage"));
        assert_eq!(response.headers()[header::CACHE_CONTROL], "max-age=300");
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({"s": 0, "d": []}));
    }
}
