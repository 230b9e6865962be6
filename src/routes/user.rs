//! User-facing routes: profiles, notifications, follows and likes.
//!
//! Every route follows the same shape: validate, build one `RequestSpec`,
//! forward it, shape the answer. Builders are plain functions of their inputs
//! so the outbound request can be checked without a network.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::Method;
use axum::response::Response;
use serde_json::json;

use crate::config::UpstreamConfig;
use crate::error::BffError;
use crate::http::response;
use crate::http::server::AppState;
use crate::upstream::{endpoint, is_dot_segment, RequestSpec, StaticCredentials, UpstreamError, UpstreamResponse, CLIENT_SRC};
use crate::validator::{body_input, positive_number, query_input, text, validate, FieldRule, Input};

/// Rule sets, one per validated route.
pub mod rules {
    use super::*;

    pub const MULTI_USER: &[FieldRule] = &[FieldRule::string("ids").required()];

    pub const NOTIFICATION: &[FieldRule] = &[FieldRule::string("before")];

    pub const IS_FOLLOWED: &[FieldRule] = &[
        FieldRule::string("currentUid").required(),
        FieldRule::string("targetUids").required(),
    ];

    pub const ENTRY: &[FieldRule] = &[FieldRule::string("entryId").required().check(path_segment)];

    pub const RECOMMEND_CARD: &[FieldRule] = &[FieldRule::string("limit")
        .required()
        .check(positive_number)
        .message("limit must be a positive integer")];

    pub const FOLLOW: &[FieldRule] = &[
        FieldRule::string("follower").required(),
        FieldRule::string("followee").required(),
    ];
}

/// An id that can stand as a single URL path segment.
fn path_segment(value: &serde_json::Value) -> bool {
    value.as_str().is_some_and(|s| !is_dot_segment(s))
}

/// Follow or unfollow; selects the upstream path suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

impl FollowAction {
    fn suffix(self) -> &'static str {
        match self {
            FollowAction::Follow => "follow",
            FollowAction::Unfollow => "unfollow",
        }
    }
}

/// Read or reset the unread-notification counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Get,
    Set,
}

impl CounterAction {
    fn suffix(self) -> &'static str {
        match self {
            CounterAction::Get => "getUserNotificationNum",
            CounterAction::Set => "setUserNotificationNum",
        }
    }
}

// Request builders.

pub fn multi_user_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    input: &Input,
) -> Result<RequestSpec, UpstreamError> {
    let url = endpoint(&upstreams.user_api, &["v1", "get_multi_user"])?;
    Ok(RequestSpec::new(Method::GET, url)
        .query(credentials.query_pairs())
        .query([
            ("src", CLIENT_SRC.to_string()),
            ("ids", text(input, "ids")),
            ("cols", String::new()),
        ]))
}

pub fn notification_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    input: &Input,
) -> Result<RequestSpec, UpstreamError> {
    let url = endpoint(&upstreams.notification_api, &["v1", "getUserNotification"])?;
    Ok(RequestSpec::new(Method::GET, url)
        .query(credentials.query_pairs())
        .query([
            ("src", CLIENT_SRC.to_string()),
            ("before", text(input, "before")),
        ]))
}

pub fn is_followed_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    input: &Input,
) -> Result<RequestSpec, UpstreamError> {
    let url = endpoint(&upstreams.follow_api, &["v1", "isCurrentUserFollowed"])?;
    Ok(RequestSpec::new(Method::GET, url)
        .query([
            ("currentUid", text(input, "currentUid")),
            ("targetUids", text(input, "targetUids")),
            ("src", CLIENT_SRC.to_string()),
        ])
        .query(credentials.query_pairs()))
}

/// Like-service call for an entry. `GET` reads the like state, `PUT`/`DELETE` toggle it.
pub fn like_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    method: Method,
    input: &Input,
) -> Result<RequestSpec, UpstreamError> {
    let entry_id = text(input, "entryId");
    let url = endpoint(&upstreams.like_api, &["v1", "user", "like", "entry", entry_id.as_str()])?;
    Ok(RequestSpec::new(method, url).headers(credentials.juejin_headers()))
}

pub fn recommend_card_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    input: &Input,
) -> Result<RequestSpec, UpstreamError> {
    let url = endpoint(&upstreams.query_api, &["query"])?;
    let body = json!({
        "operationName": "",
        "query": "",
        "variables": {
            "limit": text(input, "limit"),
            "excluded": [],
        },
        "extensions": {
            "query": { "id": upstreams.recommend_query_id },
        },
    });
    Ok(RequestSpec::new(Method::POST, url)
        .headers(credentials.legacy_headers())
        .json(body))
}

pub fn notification_counter_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    action: CounterAction,
) -> Result<RequestSpec, UpstreamError> {
    let url = endpoint(&upstreams.notification_api, &["v1", action.suffix()])?;
    Ok(RequestSpec::new(Method::GET, url)
        .query(credentials.query_pairs())
        .query([("src", CLIENT_SRC)]))
}

pub fn follow_request(
    upstreams: &UpstreamConfig,
    credentials: &StaticCredentials,
    action: FollowAction,
    input: &Input,
) -> Result<RequestSpec, UpstreamError> {
    let url = endpoint(&upstreams.follow_api, &["v1", action.suffix()])?;
    Ok(RequestSpec::new(Method::GET, url)
        .query([
            ("follower", text(input, "follower")),
            ("followee", text(input, "followee")),
        ])
        .query(credentials.query_pairs())
        .query([("src", CLIENT_SRC)]))
}

// Handlers.

async fn send(state: &AppState, spec: RequestSpec) -> Result<UpstreamResponse, BffError> {
    Ok(state.forwarder.forward(spec).await?)
}

pub async fn multi_user(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, BffError> {
    let input = query_input(&query);
    validate(rules::MULTI_USER, &input)?;
    let spec = multi_user_request(&state.upstreams, &state.credentials, &input)?;
    Ok(response::relay_body(send(&state, spec).await?))
}

pub async fn notification(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, BffError> {
    let input = query_input(&query);
    validate(rules::NOTIFICATION, &input)?;
    let spec = notification_request(&state.upstreams, &state.credentials, &input)?;
    Ok(response::relay_body(send(&state, spec).await?))
}

pub async fn is_current_user_followed(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, BffError> {
    let input = query_input(&query);
    validate(rules::IS_FOLLOWED, &input)?;
    let spec = is_followed_request(&state.upstreams, &state.credentials, &input)?;
    Ok(response::relay_body(send(&state, spec).await?))
}

pub async fn is_article_like(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, BffError> {
    let input = query_input(&query);
    validate(rules::ENTRY, &input)?;
    let spec = like_request(&state.upstreams, &state.credentials, Method::GET, &input)?;
    Ok(response::relay_body(send(&state, spec).await?))
}

pub async fn recommend_card(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Response, BffError> {
    let input = query_input(&query);
    validate(rules::RECOMMEND_CARD, &input)?;
    let spec = recommend_card_request(&state.upstreams, &state.credentials, &input)?;
    Ok(response::card(send(&state, spec).await?))
}

/// `PUT /like` and `DELETE /like`: the inbound method is the upstream method.
pub async fn toggle_like(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, BffError> {
    let input = body_input(&body);
    validate(rules::ENTRY, &input)?;
    let spec = like_request(&state.upstreams, &state.credentials, method, &input)?;
    Ok(response::mirror(send(&state, spec).await?))
}

pub async fn get_notification_num(State(state): State<AppState>) -> Result<Response, BffError> {
    let spec = notification_counter_request(&state.upstreams, &state.credentials, CounterAction::Get)?;
    Ok(response::relay_body(send(&state, spec).await?))
}

pub async fn set_notification_num(State(state): State<AppState>) -> Result<Response, BffError> {
    let spec = notification_counter_request(&state.upstreams, &state.credentials, CounterAction::Set)?;
    Ok(response::relay_body(send(&state, spec).await?))
}

pub async fn follow(State(state): State<AppState>, body: Bytes) -> Result<Response, BffError> {
    follow_with(state, FollowAction::Follow, &body).await
}

pub async fn unfollow(State(state): State<AppState>, body: Bytes) -> Result<Response, BffError> {
    follow_with(state, FollowAction::Unfollow, &body).await
}

async fn follow_with(state: AppState, action: FollowAction, body: &[u8]) -> Result<Response, BffError> {
    let input = body_input(body);
    validate(rules::FOLLOW, &input)?;
    let spec = follow_request(&state.upstreams, &state.credentials, action, &input)?;
    Ok(response::relay_body(send(&state, spec).await?))
}
