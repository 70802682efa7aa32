//! Endpoint registry: logical service name → base address.
//!
//! # Responsibilities
//! - Hold the fixed set of backend services known at startup
//! - Resolve a logical name to its base URL
//! - List every service in registration order
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - No mutation API; adding a backend requires a restart
//! - Unknown names are an explicit error, never a guessed default

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

use crate::config::ServiceConfig;

/// Lookup of a name that is not registered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service '{0}'")]
pub struct UnknownServiceError(pub String);

/// Errors raised while building a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("service name must not be empty")]
    EmptyName,

    #[error("service '{0}' is registered more than once")]
    Duplicate(String),

    #[error("service '{name}' has invalid address: {reason}")]
    InvalidAddress { name: String, reason: String },
}

/// A single backend service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    name: String,
    base_address: Url,
}

impl ServiceEndpoint {
    pub fn new(name: impl Into<String>, base_address: Url) -> Self {
        Self {
            name: name.into(),
            base_address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_address(&self) -> &Url {
        &self.base_address
    }
}

/// Fixed lookup table of backend services.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<ServiceEndpoint>,
    index: HashMap<String, usize>,
}

impl EndpointRegistry {
    /// Build a registry, preserving the given order.
    pub fn new(endpoints: impl IntoIterator<Item = ServiceEndpoint>) -> Result<Self, RegistryError> {
        let mut registry = Self::default();
        for endpoint in endpoints {
            if endpoint.name.trim().is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if registry.index.contains_key(&endpoint.name) {
                return Err(RegistryError::Duplicate(endpoint.name));
            }
            registry
                .index
                .insert(endpoint.name.clone(), registry.endpoints.len());
            registry.endpoints.push(endpoint);
        }
        Ok(registry)
    }

    /// Build a registry from configured services.
    pub fn from_config(services: &[ServiceConfig]) -> Result<Self, RegistryError> {
        let endpoints = services
            .iter()
            .map(|s| {
                Url::parse(&s.url)
                    .map(|url| ServiceEndpoint::new(s.name.clone(), url))
                    .map_err(|e| RegistryError::InvalidAddress {
                        name: s.name.clone(),
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(endpoints)
    }

    /// Resolve a service name to its base address.
    pub fn resolve(&self, name: &str) -> Result<&Url, UnknownServiceError> {
        self.index
            .get(name)
            .map(|&i| &self.endpoints[i].base_address)
            .ok_or_else(|| UnknownServiceError(name.to_string()))
    }

    /// All services in registration order.
    pub fn list_all(&self) -> &[ServiceEndpoint] {
        &self.endpoints
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_services;

    fn endpoint(name: &str, url: &str) -> ServiceEndpoint {
        ServiceEndpoint::new(name, Url::parse(url).unwrap())
    }

    #[test]
    fn test_resolve() {
        let registry = EndpointRegistry::new([
            endpoint("curator", "http://curator:5061"),
            endpoint("monetizer", "http://monetizer:5060"),
        ])
        .unwrap();

        let url = registry.resolve("curator").unwrap();
        assert_eq!(url.host_str(), Some("curator"));
        assert_eq!(url.port(), Some(5061));
    }

    #[test]
    fn test_resolve_unknown_never_guesses() {
        let registry = EndpointRegistry::new([endpoint("curator", "http://curator:5061")]).unwrap();

        assert_eq!(
            registry.resolve("gateway"),
            Err(UnknownServiceError("gateway".to_string()))
        );
        assert!(registry.resolve("").is_err());
        assert!(registry.resolve("Curator").is_err());
    }

    #[test]
    fn test_list_all_keeps_registration_order() {
        let registry = EndpointRegistry::from_config(&default_services()).unwrap();
        let names: Vec<_> = registry.list_all().iter().map(|e| e.name()).collect();
        assert_eq!(names, ["gateway", "curator", "monetizer", "public"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_rejects_duplicates_and_empty_names() {
        let err = EndpointRegistry::new([
            endpoint("curator", "http://a:1"),
            endpoint("curator", "http://b:2"),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("curator".into()));

        let err = EndpointRegistry::new([endpoint(" ", "http://a:1")]).unwrap_err();
        assert_eq!(err, RegistryError::EmptyName);
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let err = EndpointRegistry::from_config(&[ServiceConfig::new("curator", "not a url")])
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidAddress { ref name, .. } if name == "curator"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = EndpointRegistry::new(Vec::new()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.list_all().is_empty());
    }
}
