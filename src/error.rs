//! Caller-facing error taxonomy.
//!
//! Every failure that reaches an HTTP caller is one of these variants and is
//! rendered as `{ "error": "<message>" }` with the mapped status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::routing::UnknownServiceError;

/// Errors surfaced to callers of the front door.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A route references a service missing from the registry (configuration bug).
    #[error(transparent)]
    UnknownService(#[from] UnknownServiceError),

    /// A path requiring a bearer credential was called without one.
    #[error("Authentication required")]
    Unauthenticated,

    /// The backend could not be reached or did not answer in time.
    #[error("Service '{service}' is unavailable: {reason}")]
    UpstreamUnavailable { service: String, reason: String },

    /// The upstream URL could not be built from base address and path.
    #[error("Invalid upstream target '{0}'")]
    InvalidTarget(String),

    /// A passthrough route named a service that is not registered.
    #[error("No service named '{0}'")]
    ServiceNotFound(String),

    /// The request path contains a `.` or `..` segment.
    #[error("Invalid request path '{0}'")]
    InvalidPath(String),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthenticated => StatusCode::UNAUTHORIZED,
            GatewayError::ServiceNotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnknownService(_)
            | GatewayError::UpstreamUnavailable { .. }
            | GatewayError::InvalidTarget(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
