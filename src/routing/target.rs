//! Upstream URI construction.

use axum::http::Uri;
use url::Url;

use crate::error::GatewayError;

/// Join a service base address, a sub-path and an optional query string.
///
/// The base may carry its own path prefix (`http://host/prefix`); the sub-path
/// is appended after it. An empty query is dropped.
pub fn upstream_uri(base: &Url, sub_path: &str, query: Option<&str>) -> Result<Uri, GatewayError> {
    let mut target = base.as_str().trim_end_matches('/').to_string();
    if !sub_path.starts_with('/') {
        target.push('/');
    }
    target.push_str(sub_path);

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    target
        .parse::<Uri>()
        .map_err(|_| GatewayError::InvalidTarget(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_joins_base_and_path() {
        let uri = upstream_uri(&base("http://curator:5061"), "/videos", None).unwrap();
        assert_eq!(uri.to_string(), "http://curator:5061/videos");
    }

    #[test]
    fn test_preserves_query() {
        let uri = upstream_uri(&base("http://curator:5061"), "/videos", Some("limit=200&offset=0")).unwrap();
        assert_eq!(uri.to_string(), "http://curator:5061/videos?limit=200&offset=0");
        assert_eq!(uri.query(), Some("limit=200&offset=0"));
    }

    #[test]
    fn test_base_path_prefix() {
        let uri = upstream_uri(&base("http://public:5062/v1/"), "stream/42", Some("")).unwrap();
        assert_eq!(uri.to_string(), "http://public:5062/v1/stream/42");
    }

    #[test]
    fn test_invalid_target() {
        let err = upstream_uri(&base("http://curator:5061"), "/bad path", None).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidTarget(_)));
    }
}
