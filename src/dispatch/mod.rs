//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! (method, path)
//!     → dispatcher.rs (Matching → AuthChecking → Invoking state walk)
//!     → auth.rs (allow/deny via the registered predicate)
//!     → runner.rs (handler execution boundary)
//! ```

pub mod auth;
pub mod dispatcher;
pub mod runner;

pub use auth::{AuthDecision, AuthPredicate};
pub use dispatcher::Dispatcher;
pub use runner::{EchoRunner, HandlerCall, HandlerRunner};
