//! Request-level error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;
use crate::validator::InvalidInput;

/// Message returned to the browser when the forwarded call fails.
pub const UPSTREAM_FAILURE: &str = "Upstream request failed";

/// Errors a handler can return.
///
/// Recommendation-card parse failures are not here: they are absorbed into an
/// empty envelope by the response shaper.
#[derive(Debug, Error)]
pub enum BffError {
    /// Missing or malformed caller input. Raised before any upstream call.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The forwarded call could not be completed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl BffError {
    pub fn status(&self) -> StatusCode {
        match self {
            BffError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BffError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for BffError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            BffError::InvalidInput(invalid) => {
                tracing::debug!(fields = ?invalid.fields(), "Rejected invalid input");
                let body = json!({
                    "message": invalid.to_string(),
                    "errors": invalid.violations(),
                });
                (status, Json(body)).into_response()
            }
            BffError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream call failed");
                (status, Json(json!({ "message": UPSTREAM_FAILURE }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::FieldViolation;

    #[test]
    fn test_status_mapping() {
        let invalid = BffError::from(InvalidInput(vec![FieldViolation {
            field: "ids",
            message: "ids is required".into(),
        }]));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.to_string(), "invalid input: ids is required");

        let upstream = BffError::from(UpstreamError::InvalidBase {
            base: "x".into(),
            reason: "y".into(),
        });
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_invalid_input_body() {
        let response = BffError::from(InvalidInput(vec![
            FieldViolation { field: "follower", message: "follower is required".into() },
            FieldViolation { field: "followee", message: "followee is required".into() },
        ]))
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "follower is required");
        assert_eq!(body["errors"][1]["field"], "followee");
    }

    #[tokio::test]
    async fn test_upstream_failure_body_is_json() {
        let response = BffError::from(UpstreamError::InvalidSegment("..".into())).into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()["content-type"], "application/json");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Upstream request failed" }));
    }
}
