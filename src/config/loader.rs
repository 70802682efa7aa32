//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, RuntimeMode, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Services whose base address can be overridden with `<NAME>_URL`.
const OVERRIDABLE_SERVICES: [&str; 4] = ["gateway", "curator", "monetizer", "public"];

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {key}: {message}")]
    Env { key: String, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment-style overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup("PORT") {
        config.listener.port = port.trim().parse().map_err(|e| ConfigError::Env {
            key: "PORT".to_string(),
            message: format!("'{}' is not a port: {}", port, e),
        })?;
    }

    if let Some(env) = lookup("NODE_ENV") {
        config.mode = RuntimeMode::from_env_value(&env);
    }

    for name in OVERRIDABLE_SERVICES {
        let key = format!("{}_URL", name.to_uppercase());
        let Some(url) = lookup(&key) else {
            continue;
        };
        match config.services.iter_mut().find(|s| s.name == name) {
            Some(service) => service.url = url,
            None => config.services.push(ServiceConfig::new(name, url)),
        }
    }

    Ok(config)
}
