//! Access Control Middleware.
//! Rejects dot-segment paths, then gates credential presence; validation is
//! left to the consuming service.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::GatewayError;
use crate::security::policy::{bearer_token, has_dot_segment, AccessPolicy};

pub async fn access_control_middleware(
    State(policy): State<Arc<AccessPolicy>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    if has_dot_segment(path) {
        tracing::warn!(path = %path, "Rejecting path with dot segment");
        return GatewayError::InvalidPath(path.to_string()).into_response();
    }

    if !policy.requires_auth(path) {
        return next.run(req).await;
    }

    let has_token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .is_some();

    if !has_token {
        tracing::debug!(path = %path, "Rejecting request without bearer credential");
        return GatewayError::Unauthenticated.into_response();
    }

    next.run(req).await
}
