//! Concurrent fan-out health probing.
//!
//! # Responsibilities
//! - Probe every registered service's health path once
//! - Bound each probe by its own timeout
//! - Fold the outcomes into a `HealthReport`

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request};
use futures_util::future::join_all;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::health::report::HealthReport;
use crate::net::{build_client, UpstreamClient};
use crate::observability::metrics;
use crate::routing::{upstream_uri, EndpointRegistry, ServiceEndpoint};

/// Probes the health path of every registered service.
pub struct HealthProber {
    client: UpstreamClient,
    path: String,
    timeout: Duration,
}

impl HealthProber {
    pub fn new(config: &HealthCheckConfig) -> Self {
        let timeout = Duration::from_millis(config.timeout_ms);
        Self {
            client: build_client(timeout),
            path: config.path.clone(),
            timeout,
        }
    }

    /// Per-request timeout applied to each service.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe all services concurrently.
    ///
    /// Never fails: an unreachable service is recorded as `false` and the
    /// remaining services are still checked. Total latency is bounded by the
    /// slowest single probe.
    pub async fn probe_all(&self, registry: &EndpointRegistry) -> HealthReport {
        let checks = registry.list_all().iter().map(|endpoint| async move {
            let healthy = self.probe(endpoint).await;
            metrics::record_service_health(endpoint.name(), healthy);
            (endpoint.name().to_string(), healthy)
        });

        let report = HealthReport::from_results(join_all(checks).await);

        tracing::debug!(
            status = ?report.status(),
            services = registry.len(),
            "Health probe complete"
        );
        report
    }

    /// Probe one service. Only a success status within the timeout counts.
    async fn probe(&self, endpoint: &ServiceEndpoint) -> bool {
        let name = endpoint.name();
        let uri = match upstream_uri(endpoint.base_address(), &self.path, None) {
            Ok(uri) => uri,
            Err(e) => {
                tracing::error!(service = %name, error = %e, "Failed to build health check uri");
                return false;
            }
        };

        let request = match Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::USER_AGENT, "front-door-health-check")
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(e) => {
                tracing::error!(service = %name, error = %e, "Failed to build health check request");
                return false;
            }
        };

        match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => {
                let success = response.status().is_success();
                if !success {
                    tracing::warn!(service = %name, status = %response.status(), "Health check failed: non-success status");
                }
                success
            }
            Ok(Err(e)) => {
                tracing::warn!(service = %name, error = %e, "Health check failed: connection error");
                false
            }
            Err(_) => {
                tracing::warn!(service = %name, timeout_ms = self.timeout.as_millis() as u64, "Health check failed: timeout");
                false
            }
        }
    }
}
