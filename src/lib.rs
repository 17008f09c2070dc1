//! Minimal HTTP route dispatch.
//!
//! Maps a request's method and target to a registered handler, extracts typed
//! parameters from the path and query string, and invokes the handler.
//!
//! ```text
//! raw target → routing::normalize (path / query split)
//!            → params::decode_query
//!            → routing::RouteTable::lookup (first match, path captures)
//!            → routing::Dispatcher (merge, path wins; invoke; contain failures)
//!            → Outcome { status, body }
//! ```

// Core
pub mod params;
pub mod routing;

// Serving surface
pub mod http;
pub mod testing;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use params::{Params, Value};
pub use routing::{Dispatcher, Handler, HandlerError, Outcome, RouteTable, Signature};
