//! Route table.
//!
//! # Data Flow
//! ```text
//! Inbound request (method, path, query/body)
//!     → axum Router (path + method dispatch)
//!     → user.rs handler
//!         → validator (rule table for the route)
//!         → request builder (RequestSpec + static credentials)
//!         → Forwarder (one outbound call)
//!         → http::response (relay, mirror or card envelope)
//! ```

pub mod user;

use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// All public routes, before state and middleware are attached.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/multiUser", get(user::multi_user))
        .route("/notification", get(user::notification))
        .route("/isCurrentUserFollowed", get(user::is_current_user_followed))
        .route("/isArticleLike", get(user::is_article_like))
        .route("/recommendCard", get(user::recommend_card))
        .route("/like", put(user::toggle_like).delete(user::toggle_like))
        .route(
            "/userNotificationNum",
            get(user::get_notification_num).put(user::set_notification_num),
        )
        .route("/follow", put(user::follow).delete(user::unfollow))
}
