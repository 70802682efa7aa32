//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay the upstream status and body as a stream
//! - Strip hop-by-hop headers from upstream responses
//! - Apply the fixed stream-route header policy

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Response};
use hyper::body::Incoming;

use crate::http::request::{connection_listed, is_hop_by_hop};

/// Turn an upstream response into a client response without buffering the body.
pub fn relay(upstream: Response<Incoming>) -> Response<Body> {
    let (mut parts, body) = upstream.into_parts();
    strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed = connection_listed(headers);
    let names: Vec<_> = headers
        .keys()
        .filter(|name| is_hop_by_hop(name) || listed.contains(name))
        .cloned()
        .collect();
    for name in names {
        headers.remove(name);
    }
}

/// Headers for third-party video players: byte ranges, any origin, mp4 payload.
pub fn apply_stream_headers(headers: &mut HeaderMap) {
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("video/mp4"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("1024"));
        apply_stream_headers(&mut headers);

        assert_eq!(headers[header::ACCEPT_RANGES], "bytes");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::CONTENT_TYPE], "video/mp4");
        assert_eq!(headers[header::CONTENT_LENGTH], "1024");
    }

    #[test]
    fn test_strip_hop_by_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("x-upstream-node"));
        headers.insert("x-upstream-node", HeaderValue::from_static("cdn-3"));
        headers.insert(header::CONTENT_RANGE, HeaderValue::from_static("bytes 0-9/100"));
        strip_hop_by_hop(&mut headers);

        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key(header::CONTENT_RANGE));
    }
}
