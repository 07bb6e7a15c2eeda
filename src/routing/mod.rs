//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     handler tree
//!         → scanner.rs (extract descriptors from file headers)
//!         → cache.rs (persist / reload without rescanning)
//!         → table.rs (ordered, immutable RouteTable)
//!
//! Per request:
//!     (method, path)
//!         → matcher.rs (first-match-wins template walk)
//!         → Return: RouteMatch { descriptor, params } or None
//! ```
//!
//! # Design Decisions
//! - Table built once at startup, immutable at runtime
//! - Discovery order is precedence order; no specificity scoring
//! - Cache has no freshness check; invalidation is manual by contract

pub mod cache;
pub mod descriptor;
pub mod matcher;
pub mod scanner;
pub mod table;

pub use cache::RouteCache;
pub use descriptor::RouteDescriptor;
pub use matcher::{match_route, PathParams, RouteMatch};
pub use table::{RouteTable, TableSource};
