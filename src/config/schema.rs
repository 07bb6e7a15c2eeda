//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the convention router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// API surface configuration (path prefix).
    pub api: ApiConfig,

    /// Handler discovery configuration (root directory, scan convention).
    pub handlers: HandlerConfig,

    /// Route cache configuration (record location).
    pub cache: CacheConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// API surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Path prefix stripped before matching. Requests are expected to
    /// carry it; see the matcher's precondition.
    pub prefix: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: "/api".to_string(),
        }
    }
}

/// Handler discovery configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Root directory scanned for handler files.
    pub root: PathBuf,

    /// Header convention used to recognize and parse handler files.
    pub convention: ScanConvention,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("handlers"),
            convention: ScanConvention::default(),
        }
    }
}

/// The declarative header convention for handler files.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConvention {
    /// File extension (without dot) that marks a file as a handler.
    pub extension: String,

    /// Required opening of a handler file; files not starting with it are
    /// skipped.
    pub opening: String,

    /// Marker introducing the route declaration line.
    pub route_marker: String,

    /// Marker introducing the auth declaration line.
    pub auth_marker: String,
}

impl Default for ScanConvention {
    fn default() -> Self {
        Self {
            extension: "js".to_string(),
            opening: "//".to_string(),
            route_marker: "@route".to_string(),
            auth_marker: "@auth".to_string(),
        }
    }
}

/// Route cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache record location. Created on first scan; never auto-invalidated.
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cache/routes.json"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
