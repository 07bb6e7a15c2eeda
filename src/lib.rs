//! Convention-Based HTTP Request Router Library

pub mod config;
pub mod dispatch;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use dispatch::{AuthPredicate, Dispatcher, EchoRunner, HandlerCall, HandlerRunner};
pub use http::HttpServer;
pub use routing::{RouteCache, RouteDescriptor, RouteTable, TableSource};
