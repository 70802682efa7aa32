//! Request forwarding to backend services.
//!
//! # Responsibilities
//! - Resolve the logical service through the registry
//! - Build `base + sub_path` keeping the inbound query string
//! - Copy method, end-to-end headers and the streaming body
//! - Relay the upstream status and body, or synthesize an error
//!
//! # Design Decisions
//! - No retries: one attempt per inbound request
//! - The deadline covers the upstream response head; the body streams afterwards
//! - Bodies are never buffered, in either direction

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, Response};
use tokio::time;

use crate::error::GatewayError;
use crate::http::request::{copy_forwardable_headers, request_id};
use crate::http::response::relay;
use crate::net::{build_client, UpstreamClient};
use crate::observability::metrics;
use crate::routing::{upstream_uri, EndpointRegistry};

/// Relays inbound requests to registered backends over a shared client.
pub struct Forwarder {
    registry: Arc<EndpointRegistry>,
    client: UpstreamClient,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(registry: Arc<EndpointRegistry>, timeout: Duration) -> Self {
        Self {
            registry,
            client: build_client(timeout),
            timeout,
        }
    }

    /// Relay `inbound` to `service` at `sub_path`.
    pub async fn forward(
        &self,
        service: &str,
        sub_path: &str,
        inbound: Request<Body>,
    ) -> Result<Response<Body>, GatewayError> {
        let start = Instant::now();
        let (parts, body) = inbound.into_parts();
        let method = parts.method.clone();
        let rid = request_id(&parts.headers).to_string();

        let base = self.registry.resolve(service).map_err(|e| {
            tracing::error!(request_id = %rid, service = %service, "Route targets unregistered service");
            GatewayError::from(e)
        })?;
        let uri = upstream_uri(base, sub_path, parts.uri.query())?;

        tracing::debug!(
            request_id = %rid,
            method = %method,
            service = %service,
            upstream = %uri,
            "Forwarding request"
        );

        let mut outbound = Request::builder().method(method.clone()).uri(uri);
        if let Some(headers) = outbound.headers_mut() {
            copy_forwardable_headers(&parts.headers, headers);
        }
        let outbound = outbound
            .body(body)
            .map_err(|e| GatewayError::InvalidTarget(e.to_string()))?;

        match time::timeout(self.timeout, self.client.request(outbound)).await {
            Ok(Ok(response)) => {
                let status = response.status();
                metrics::record_request(method.as_str(), status.as_u16(), service, start);
                tracing::debug!(request_id = %rid, service = %service, status = %status, "Upstream responded");
                Ok(relay(response))
            }
            Ok(Err(e)) => {
                tracing::error!(request_id = %rid, service = %service, error = %e, "Upstream error");
                metrics::record_request(method.as_str(), 502, service, start);
                Err(GatewayError::UpstreamUnavailable {
                    service: service.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                tracing::error!(
                    request_id = %rid,
                    service = %service,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Upstream timeout"
                );
                metrics::record_request(method.as_str(), 502, service, start);
                Err(GatewayError::UpstreamUnavailable {
                    service: service.to_string(),
                    reason: format!("no response within {}ms", self.timeout.as_millis()),
                })
            }
        }
    }
}
