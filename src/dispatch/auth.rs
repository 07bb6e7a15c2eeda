//! Authorization gate.
//!
//! # Responsibilities
//! - Decide allow/deny for a matched route's auth rule
//! - Hold the caller-supplied predicate as explicit configuration state
//!
//! # Design Decisions
//! - The predicate is a narrow capability: one opaque token in, bool out;
//!   the router never interprets the token itself
//! - Registered once at startup, immutable afterwards
//! - A rule with no registered predicate denies (fail-closed)

use std::sync::Arc;

/// Caller-supplied authorization predicate over opaque rule tokens.
pub type AuthPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Outcome of the auth gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny,
}

/// Evaluate a descriptor's auth rule against the registered predicate.
///
/// No rule means the route is open. A rule with no predicate registered is
/// denied rather than waved through.
pub fn check(auth_rule: Option<&str>, predicate: Option<&AuthPredicate>) -> AuthDecision {
    let rule = match auth_rule {
        Some(r) => r,
        None => return AuthDecision::Allow,
    };

    match predicate {
        Some(predicate) => {
            if predicate(rule) {
                AuthDecision::Allow
            } else {
                AuthDecision::Deny
            }
        }
        None => {
            tracing::warn!(rule = %rule, "Auth rule present but no predicate registered; denying");
            AuthDecision::Deny
        }
    }
}
