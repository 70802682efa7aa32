//! Per-path authentication policy.
//!
//! # Rules
//! ```text
//! path with a `.`/`..` segment → rejected before any other rule
//! development mode             → never required
//! configured public path       → never required (exact match)
//! path with /videos/ or /stream/ segment → never required (public streaming)
//! anything else                → bearer credential required
//! ```

use crate::config::{AuthConfig, RuntimeMode};

/// Path segments that mark public video content.
const PUBLIC_VIDEO_SEGMENTS: [&str; 2] = ["/videos/", "/stream/"];

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    mode: RuntimeMode,
    public_paths: Vec<String>,
}

impl AccessPolicy {
    pub fn new(mode: RuntimeMode, config: &AuthConfig) -> Self {
        Self {
            mode,
            public_paths: config.public_paths.clone(),
        }
    }

    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Whether a request to `path` must carry a bearer credential.
    pub fn requires_auth(&self, path: &str) -> bool {
        if self.mode.is_development() {
            return false;
        }
        if self.public_paths.iter().any(|p| p == path) {
            return false;
        }
        !is_video_path(path)
    }
}

fn is_video_path(path: &str) -> bool {
    PUBLIC_VIDEO_SEGMENTS.iter().any(|segment| path.contains(segment))
}

/// Whether `path` has a `.` or `..` segment, plain or percent-encoded.
///
/// Upstreams resolve dot segments, so such a path can match a public prefix
/// here and land on a protected endpoint there.
pub fn has_dot_segment(path: &str) -> bool {
    let decoded = path
        .to_ascii_lowercase()
        .replace("%2e", ".")
        .replace("%2f", "/")
        .replace("%5c", "/")
        .replace('\\', "/");
    decoded.split('/').any(|segment| segment == "." || segment == "..")
}

/// Extract a non-empty bearer token from an `Authorization` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
