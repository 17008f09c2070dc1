//! Shared route tables for integration tests.

use route_dispatch::routing::{HandlerError, RouteTable, Signature};
use route_dispatch::{Dispatcher, Params};

/// Render a value with its type label, e.g. `int:123`.
pub fn typed(p: &Params, name: &str) -> Result<String, HandlerError> {
    let value = p.require(name)?;
    Ok(format!("{}:{}", value.kind(), value))
}

/// A table mirroring a small application.
pub fn app_routes() -> RouteTable {
    let mut table = RouteTable::new();
    table
        .get("/hello", |_: &Params| -> Result<&'static str, HandlerError> {
            Ok("Hello, World!")
        })
        .unwrap()
        .get("/users/admin", |_: &Params| -> Result<&'static str, HandlerError> {
            Ok("Admin panel")
        })
        .unwrap()
        .register_with(
            axum::http::Method::GET,
            "/users/{id}",
            Signature::new().required("id").optional("active"),
            |p: &Params| -> Result<String, HandlerError> {
                match p.get("active") {
                    Some(active) => Ok(format!("User {}, Active: {}", p.require("id")?, active)),
                    None => Ok(format!("User {}", p.require("id")?)),
                }
            },
        )
        .unwrap()
        .get(
            "/users/{userId}/posts/{postId}",
            |p: &Params| -> Result<String, HandlerError> {
                Ok(format!(
                    "User {}, Post {}",
                    p.require("userId")?,
                    p.require("postId")?
                ))
            },
        )
        .unwrap()
        .get("/search", |p: &Params| -> Result<String, HandlerError> {
            let limit = match p.get("limit") {
                Some(_) => p.require_i64("limit")?,
                None => 10,
            };
            Ok(format!("Search: {}, Limit: {}", p.require("q")?, limit))
        })
        .unwrap()
        .get("/items/{id}", |p: &Params| typed(p, "id"))
        .unwrap()
        .get("/filter", |p: &Params| typed(p, "active"))
        .unwrap()
        .get("/calculate", |p: &Params| typed(p, "ratio"))
        .unwrap()
        .get("/tags", |p: &Params| typed(p, "tag"))
        .unwrap()
        .get("/greet", |p: &Params| -> Result<String, HandlerError> {
            Ok(format!("Hello, {}", p.require("name")?))
        })
        .unwrap()
        .get("/fail", |_: &Params| -> Result<String, HandlerError> {
            Err(HandlerError::failed("database unavailable"))
        })
        .unwrap()
        .post("/users", |_: &Params| -> Result<&'static str, HandlerError> {
            Ok("User created")
        })
        .unwrap()
        .post(
            "/users/{id}/activate",
            |p: &Params| -> Result<String, HandlerError> {
                Ok(format!("User {} activated", p.require("id")?))
            },
        )
        .unwrap();
    table
}

pub fn app_dispatcher() -> Dispatcher {
    Dispatcher::new(app_routes())
}
