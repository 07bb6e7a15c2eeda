//! Route descriptor definitions.
//!
//! # Responsibilities
//! - Represent one discoverable endpoint (template, methods, auth rule, handler)
//! - Serde traits for the on-disk cache record
//! - Template introspection (segment iteration, parameter detection)
//!
//! # Design Decisions
//! - Methods stored as a BTreeSet so cache records serialize deterministically
//! - `methods: None` means "any method" (distinct from an empty set)
//! - Equality is field-for-field; method-set comparison is order-insensitive

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Leading character that marks a template segment as a named parameter.
pub const PARAM_MARKER: char = ':';

/// HTTP method names accepted inside a route declaration's method list.
pub const KNOWN_METHODS: [&str; 9] = [
    "GET", "HEAD", "POST", "PUT", "DELETE", "CONNECT", "OPTIONS", "TRACE", "PATCH",
];

/// One discoverable endpoint, as extracted from a handler file header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Path template, e.g. `/user/:id`. Split on `/` for matching; a fixed
    /// segment count per descriptor (no variadic segments).
    pub template: String,

    /// Allowed methods (uppercase). `None` accepts any method.
    pub methods: Option<BTreeSet<String>>,

    /// Opaque token handed to the auth predicate. `None` means no auth.
    pub auth_rule: Option<String>,

    /// Handler file path, resolvable by the handler runner.
    pub handler_ref: PathBuf,
}

impl RouteDescriptor {
    /// Template segments after trimming leading/trailing slashes.
    ///
    /// A root template (`/` or empty) yields a single empty segment, which
    /// is compared literally like any other segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.template.trim_matches('/').split('/')
    }

    /// True if the descriptor accepts the given (uppercase) method name.
    pub fn allows_method(&self, method: &str) -> bool {
        match &self.methods {
            Some(set) => set.contains(method),
            None => true,
        }
    }
}

/// True for method names the scanner accepts in a bracketed method list.
pub fn is_known_method(name: &str) -> bool {
    KNOWN_METHODS.contains(&name)
}
