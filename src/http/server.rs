//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, access policy)
//! - Serve until the shutdown signal, then stop the sentinel
//!
//! # Routes
//! - `GET /api/videos` → video listing service
//! - `GET /api/videos/stream/{id}` → stream service, byte pass-through
//! - `ANY /api/{service}/{*rest}` → any registered service
//! - `GET /health` → aggregate backend health
//! - `GET /admin/sentinel` → sentinel status

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, Response},
    middleware,
    routing::{any, get},
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, ProxyRoutesConfig};
use crate::error::GatewayError;
use crate::health::{HealthProber, HealthReport};
use crate::http::forward::Forwarder;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::apply_stream_headers;
use crate::routing::EndpointRegistry;
use crate::security::{access_control_middleware, AccessPolicy};
use crate::sentinel::{Sentinel, SentinelStatus};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<EndpointRegistry>,
    pub forwarder: Arc<Forwarder>,
    pub prober: Arc<HealthProber>,
    pub sentinel: Sentinel,
    pub routes: Arc<ProxyRoutesConfig>,
}

/// HTTP server for the front door.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    sentinel: Sentinel,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig, registry: Arc<EndpointRegistry>, sentinel: Sentinel) -> Self {
        let forwarder = Arc::new(Forwarder::new(
            registry.clone(),
            Duration::from_millis(config.timeouts.upstream_ms),
        ));
        let prober = Arc::new(HealthProber::new(&config.health_check));
        let policy = Arc::new(AccessPolicy::new(config.mode, &config.auth));

        let state = AppState {
            registry,
            forwarder,
            prober,
            sentinel: sentinel.clone(),
            routes: Arc::new(config.proxy.clone()),
        };

        let router = Self::build_router(&config, state, policy);
        Self {
            router,
            config,
            sentinel,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState, policy: Arc<AccessPolicy>) -> Router {
        Router::new()
            .route("/api/videos", get(list_videos))
            .route("/api/videos/stream/{id}", get(stream_video))
            .route("/api/{service}/{*rest}", any(passthrough))
            .route("/health", get(health))
            .route("/admin/sentinel", get(sentinel_status))
            .route_layer(middleware::from_fn_with_state(policy, access_control_middleware))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(CorsLayer::permissive())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn sentinel(&self) -> &Sentinel {
        &self.sentinel
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let HttpServer { router, config, sentinel } = self;
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = ?config.mode,
            services = config.services.len(),
            "HTTP server starting"
        );

        if config.sentinel.enabled {
            sentinel.start().await;
        }

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await;

        sentinel.stop();
        served?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

async fn list_videos(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response<Body>, GatewayError> {
    let routes = &state.routes;
    state
        .forwarder
        .forward(&routes.videos_service, &routes.videos_path, request)
        .await
}

async fn stream_video(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response<Body>, GatewayError> {
    // Raw segment, so percent-encoding survives into the upstream URI.
    let id = request.uri().path().rsplit('/').next().unwrap_or_default();
    let sub_path = format!("{}/{}", state.routes.stream_path.trim_end_matches('/'), id);

    let mut response = state
        .forwarder
        .forward(&state.routes.stream_service, &sub_path, request)
        .await?;
    apply_stream_headers(response.headers_mut());
    Ok(response)
}

async fn passthrough(
    State(state): State<AppState>,
    Path((service, _rest)): Path<(String, String)>,
    request: Request<Body>,
) -> Result<Response<Body>, GatewayError> {
    if !state.registry.contains(&service) {
        return Err(GatewayError::ServiceNotFound(service));
    }

    let sub_path = request
        .uri()
        .path()
        .strip_prefix("/api/")
        .and_then(|p| p.split_once('/'))
        .map(|(_, rest)| format!("/{}", rest))
        .unwrap_or_else(|| "/".to_string());

    state.forwarder.forward(&service, &sub_path, request).await
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.prober.probe_all(&state.registry).await)
}

async fn sentinel_status(State(state): State<AppState>) -> Json<SentinelStatus> {
    Json(state.sentinel.status())
}
