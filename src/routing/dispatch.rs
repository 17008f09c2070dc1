//! Request dispatch.
//!
//! # Responsibilities
//! - Split the raw target into path and query
//! - Resolve the route, merge query and path parameters
//! - Invoke the handler and turn every outcome into a status and body
//!
//! # Design Decisions
//! - Path parameters override query parameters of the same name
//! - No match is a normal 404 outcome, not an error
//! - Handler errors and panics stop here: `dispatch` never fails
//! - The route table is frozen behind an `Arc` once a dispatcher exists

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use axum::http::{Method, StatusCode};

use crate::observability::metrics;
use crate::params::{decode_query, Params};
use crate::routing::error::DispatchError;
use crate::routing::normalize::Target;
use crate::routing::router::{RouteEntry, RouteMatch, RouteTable};

/// Body sent when no route matches.
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// Final result of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: StatusCode,
    pub body: String,
}

impl Outcome {
    fn ok(body: String) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: NOT_FOUND_BODY.to_string(),
        }
    }

    fn internal_error(err: &DispatchError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: format!("Internal Server Error: {}", err),
        }
    }
}

/// Resolves requests against a frozen route table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

impl Dispatcher {
    /// Freeze `table`; no routes can be added afterwards.
    pub fn new(table: RouteTable) -> Self {
        for (method, route) in table.routes() {
            tracing::info!(method = %method, template = %route.template(), "Route mounted");
        }
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Dispatch `method` + raw target (`/path?query`).
    pub fn dispatch(&self, method: &Method, target: &str) -> Outcome {
        let start = Instant::now();
        let target = Target::parse(target);

        tracing::debug!(method = %method, path = %target.path, "Dispatching request");

        let outcome = self.resolve(method, &target);
        metrics::record_dispatch(method.as_str(), outcome.status.as_u16(), start);
        outcome
    }

    fn resolve(&self, method: &Method, target: &Target) -> Outcome {
        let query = decode_query(&target.query);

        let Some(RouteMatch { route, params: path_params }) = self.table.lookup(method, &target.path)
        else {
            tracing::warn!(method = %method, path = %target.path, "No route matched");
            return Outcome::not_found();
        };

        tracing::debug!(template = %route.template(), "Route matched");

        let mut params = query;
        params.merge(path_params);

        match invoke(route, &params) {
            Ok(body) => Outcome::ok(body),
            Err(e) => {
                tracing::error!(
                    method = %method,
                    template = %route.template(),
                    error = %e,
                    "Handler failed"
                );
                Outcome::internal_error(&e)
            }
        }
    }
}

fn invoke(route: &RouteEntry, params: &Params) -> Result<String, DispatchError> {
    if let Some(signature) = route.signature() {
        signature.check(params)?;
    }

    let handler = route.handler();
    match panic::catch_unwind(AssertUnwindSafe(|| handler.call(params))) {
        Ok(result) => Ok(result?),
        Err(payload) => Err(DispatchError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Value;
    use crate::routing::{HandlerError, Signature};

    fn echo_params(p: &Params) -> Result<String, HandlerError> {
        let mut pairs: Vec<_> = p.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        pairs.sort();
        Ok(pairs.join(","))
    }

    fn dispatcher() -> Dispatcher {
        let mut table = RouteTable::new();
        table
            .get("/users/admin", |_: &Params| Ok::<_, HandlerError>("admin"))
            .unwrap()
            .get("/users/{id}", echo_params)
            .unwrap()
            .get("/greet", |p: &Params| -> Result<String, HandlerError> {
                Ok(format!("Hello, {}", p.require("name")?))
            })
            .unwrap()
            .get("/boom", |_: &Params| -> Result<String, HandlerError> {
                panic!("kaboom")
            })
            .unwrap()
            .register_with(
                Method::GET,
                "/strict/{id}",
                Signature::new().required("id"),
                echo_params,
            )
            .unwrap();
        Dispatcher::new(table)
    }

    #[test]
    fn test_path_overrides_query() {
        let out = dispatcher().dispatch(&Method::GET, "/users/42?id=999&active=true");
        assert_eq!(out.status, StatusCode::OK);
        assert_eq!(out.body, "active=true,id=42");
    }

    #[test]
    fn test_trailing_slash_and_coercion() {
        let d = dispatcher();
        let out = d.dispatch(&Method::GET, "/users/123/");
        assert_eq!(out.body, "id=123");

        let m = d.table().lookup(&Method::GET, "/users/123/").unwrap();
        assert_eq!(m.params.get("id"), Some(&Value::Int(123)));
    }

    #[test]
    fn test_not_found() {
        let out = dispatcher().dispatch(&Method::GET, "/posts/123");
        assert_eq!(out.status, StatusCode::NOT_FOUND);
        assert_eq!(out.body, NOT_FOUND_BODY);

        let out = dispatcher().dispatch(&Method::POST, "/users/1");
        assert_eq!(out.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_literal_registered_first_wins() {
        let out = dispatcher().dispatch(&Method::GET, "/users/admin");
        assert_eq!(out.body, "admin");
    }

    #[test]
    fn test_missing_param_is_internal_error() {
        let out = dispatcher().dispatch(&Method::GET, "/greet");
        assert_eq!(out.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            out.body,
            "Internal Server Error: missing required parameter 'name'"
        );

        let out = dispatcher().dispatch(&Method::GET, "/greet?name=Ada");
        assert_eq!(out.status, StatusCode::OK);
        assert_eq!(out.body, "Hello, Ada");
    }

    #[test]
    fn test_panic_is_contained() {
        let out = dispatcher().dispatch(&Method::GET, "/boom");
        assert_eq!(out.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(out.body, "Internal Server Error: handler panicked: kaboom");
    }

    #[test]
    fn test_signature_rejects_unexpected() {
        let d = dispatcher();
        assert_eq!(d.dispatch(&Method::GET, "/strict/1").body, "id=1");

        let out = d.dispatch(&Method::GET, "/strict/1?extra=2");
        assert_eq!(out.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(out.body, "Internal Server Error: unexpected parameter 'extra'");
    }

    #[test]
    fn test_clones_share_table() {
        let d = dispatcher();
        let d2 = d.clone();
        assert!(Arc::ptr_eq(&d.table, &d2.table));
    }
}
