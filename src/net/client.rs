//! Outbound HTTP client shared by the forwarder and the health prober.

use std::time::Duration;

use axum::body::Body;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

/// Pooled HTTP/1.1 client carrying streaming request bodies.
pub type UpstreamClient = Client<HttpConnector, Body>;

/// Build a client whose TCP connect step is bounded by `connect_timeout`.
pub fn build_client(connect_timeout: Duration) -> UpstreamClient {
    let mut connector = HttpConnector::new();
    connector.set_connect_timeout(Some(connect_timeout));
    connector.set_nodelay(true);

    Client::builder(TokioExecutor::new()).build(connector)
}
