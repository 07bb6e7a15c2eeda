//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, markers and paths before startup commits to them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::RouterConfig;

/// One semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    PrefixMissingSlash(String),
    EmptyHandlerExtension,
    DottedHandlerExtension(String),
    EmptyMarker(&'static str),
    ZeroRequestTimeout,
    EmptyCachePath,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(a) => {
                write!(f, "listener.bind_address {a:?} is not a socket address")
            }
            ValidationError::InvalidMetricsAddress(a) => {
                write!(f, "observability.metrics_address {a:?} is not a socket address")
            }
            ValidationError::PrefixMissingSlash(p) => {
                write!(f, "api.prefix {p:?} must start with '/'")
            }
            ValidationError::EmptyHandlerExtension => {
                write!(f, "handlers.convention.extension must not be empty")
            }
            ValidationError::DottedHandlerExtension(e) => {
                write!(f, "handlers.convention.extension {e:?} must not include the dot")
            }
            ValidationError::EmptyMarker(which) => {
                write!(f, "handlers.convention.{which} must not be empty")
            }
            ValidationError::ZeroRequestTimeout => {
                write!(f, "listener.request_timeout_secs must be greater than zero")
            }
            ValidationError::EmptyCachePath => write!(f, "cache.path must not be empty"),
        }
    }
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    // An empty prefix is allowed: it means match the full request path.
    if !config.api.prefix.is_empty() && !config.api.prefix.starts_with('/') {
        errors.push(ValidationError::PrefixMissingSlash(config.api.prefix.clone()));
    }

    let convention = &config.handlers.convention;
    if convention.extension.is_empty() {
        errors.push(ValidationError::EmptyHandlerExtension);
    } else if convention.extension.starts_with('.') {
        errors.push(ValidationError::DottedHandlerExtension(
            convention.extension.clone(),
        ));
    }
    if convention.opening.is_empty() {
        errors.push(ValidationError::EmptyMarker("opening"));
    }
    if convention.route_marker.is_empty() {
        errors.push(ValidationError::EmptyMarker("route_marker"));
    }
    if convention.auth_marker.is_empty() {
        errors.push(ValidationError::EmptyMarker("auth_marker"));
    }

    if config.cache.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyCachePath);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
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

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RouterConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.api.prefix = "api".to_string();
        config.handlers.convention.extension = ".js".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::PrefixMissingSlash("api".to_string())));
    }

    #[test]
    fn test_empty_prefix_is_allowed() {
        let mut config = RouterConfig::default();
        config.api.prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = RouterConfig::default();
        config.observability.metrics_address = "bogus".to_string();

        assert!(validate_config(&config).is_err());

        config.observability.metrics_enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}
