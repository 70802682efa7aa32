//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (video routes reference registered services)
//! - Validate value ranges (timeouts > 0, port valid)
//! - Reject duplicate or malformed service entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::fmt;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be non-zero"));
    }

    let mut seen = HashSet::new();
    for (i, service) in config.services.iter().enumerate() {
        let field = format!("services[{}]", i);
        if service.name.trim().is_empty() {
            errors.push(ValidationError::new(format!("{}.name", field), "must not be empty"));
        } else if !seen.insert(service.name.as_str()) {
            errors.push(ValidationError::new(
                format!("{}.name", field),
                format!("duplicate service '{}'", service.name),
            ));
        }

        match Url::parse(&service.url) {
            Ok(url) if url.scheme() != "http" => errors.push(ValidationError::new(
                format!("{}.url", field),
                format!("unsupported scheme '{}', expected http", url.scheme()),
            )),
            Ok(url) if url.host_str().is_none() => {
                errors.push(ValidationError::new(format!("{}.url", field), "missing host"))
            }
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::new(
                format!("{}.url", field),
                format!("invalid url '{}': {}", service.url, e),
            )),
        }
    }

    for (field, target) in [
        ("proxy.videos_service", &config.proxy.videos_service),
        ("proxy.stream_service", &config.proxy.stream_service),
    ] {
        if !seen.contains(target.as_str()) {
            errors.push(ValidationError::new(
                field,
                format!("references unregistered service '{}'", target),
            ));
        }
    }

    for (field, path) in [
        ("proxy.videos_path", &config.proxy.videos_path),
        ("proxy.stream_path", &config.proxy.stream_path),
        ("health_check.path", &config.health_check.path),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::new(field, "must start with '/'"));
        }
    }

    if config.health_check.timeout_ms == 0 {
        errors.push(ValidationError::new("health_check.timeout_ms", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.timeouts.upstream_ms == 0 {
        errors.push(ValidationError::new("timeouts.upstream_ms", "must be greater than 0"));
    }

    if config.sentinel.interval_secs == 0 {
        errors.push(ValidationError::new("sentinel.interval_secs", "must be greater than 0"));
    }
    if config.sentinel.blocks.iter().any(|b| b.trim().is_empty()) {
        errors.push(ValidationError::new("sentinel.blocks", "block names must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ServiceConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&GatewayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.port = 0;
        config.health_check.timeout_ms = 0;
        config.services.push(ServiceConfig::new("curator", "http://elsewhere:1"));
        config.services.push(ServiceConfig::new("", "not a url"));

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"listener.port"));
        assert!(fields.contains(&"health_check.timeout_ms"));
        assert!(fields.contains(&"services[4].name"));
        assert!(fields.contains(&"services[5].name"));
        assert!(fields.contains(&"services[5].url"));
    }

    #[test]
    fn test_route_target_must_be_registered() {
        let mut config = GatewayConfig::default();
        config.proxy.stream_service = "cdn".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "proxy.stream_service");
        assert!(errors[0].to_string().contains("'cdn'"));
    }

    #[test]
    fn test_rejects_https_scheme() {
        let mut config = GatewayConfig::default();
        config.services[0].url = "https://gateway:5055".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "services[0].url");
    }
}
