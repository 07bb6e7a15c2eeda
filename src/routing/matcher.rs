//! Request matching against the route table.
//!
//! # Responsibilities
//! - Strip the configured API prefix from the raw request path
//! - Compare path segments against each template, first match wins
//! - Bind parameter segments (`:name`) to their incoming values
//!
//! # Design Decisions
//! - Literal segments compare exactly and case-sensitively
//! - Segment counts must be equal; no variable-length matches
//! - No normalization beyond one leading/trailing slash trim: an empty
//!   segment from a double slash is compared literally
//! - Parameter bindings are returned to the caller, never stored in shared
//!   state, so concurrent requests cannot observe each other

use std::collections::HashMap;

use crate::routing::descriptor::{RouteDescriptor, PARAM_MARKER};
use crate::routing::table::RouteTable;

/// Parameter bindings extracted from a matched path, keyed by name
/// (without the marker).
pub type PathParams = HashMap<String, String>;

/// A successful match: the winning descriptor and its parameter bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'t> {
    pub descriptor: &'t RouteDescriptor,
    pub params: PathParams,
}

/// Find the first descriptor matching `method` + `raw_path`.
///
/// `raw_path` is expected to contain `api_prefix` (configuration
/// precondition); everything before and including the prefix is discarded
/// before matching.
pub fn match_route<'t>(
    table: &'t RouteTable,
    method: &str,
    raw_path: &str,
    api_prefix: &str,
) -> Option<RouteMatch<'t>> {
    let path = strip_prefix(raw_path, api_prefix);
    let path = path.trim_matches('/');
    let incoming: Vec<&str> = path.split('/').collect();

    for descriptor in table.routes() {
        if !descriptor.allows_method(method) {
            continue;
        }
        if let Some(params) = match_segments(descriptor, &incoming) {
            return Some(RouteMatch { descriptor, params });
        }
    }
    None
}

/// Discard everything up to and including the API prefix. A path without
/// the prefix is matched as-is; callers guarantee the prefix is present.
fn strip_prefix<'a>(raw_path: &'a str, api_prefix: &str) -> &'a str {
    if api_prefix.is_empty() {
        return raw_path;
    }
    match raw_path.find(api_prefix) {
        Some(idx) => &raw_path[idx + api_prefix.len()..],
        None => raw_path,
    }
}

fn match_segments(descriptor: &RouteDescriptor, incoming: &[&str]) -> Option<PathParams> {
    let template: Vec<&str> = descriptor.segments().collect();
    if template.len() != incoming.len() {
        return None;
    }

    let mut params = PathParams::new();
    for (pattern, value) in template.iter().zip(incoming) {
        match pattern.strip_prefix(PARAM_MARKER) {
            Some(name) => {
                params.insert(name.to_string(), value.to_string());
            }
            None => {
                if pattern != value {
                    return None;
                }
            }
        }
    }
    Some(params)
}
