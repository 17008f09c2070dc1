//! In-process client for exercising routes without a socket.
//!
//! Calls [`Dispatcher::dispatch`] directly and wraps the outcome in a
//! [`TestResponse`] carrying the same headers the HTTP server would send.

use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::http::response::TEXT_PLAIN;
use crate::routing::Dispatcher;

/// Response returned by [`TestClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResponse {
    pub status: StatusCode,
    pub text: String,
    pub headers: HashMap<String, String>,
}

impl TestResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.text)
    }
}

/// Drives a [`Dispatcher`] the way the HTTP server would.
#[derive(Debug, Clone)]
pub struct TestClient {
    dispatcher: Dispatcher,
}

impl TestClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn get(&self, target: &str) -> TestResponse {
        self.request(Method::GET, target)
    }

    pub fn post(&self, target: &str) -> TestResponse {
        self.request(Method::POST, target)
    }

    pub fn request(&self, method: Method, target: &str) -> TestResponse {
        let outcome = self.dispatcher.dispatch(&method, target);
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), TEXT_PLAIN.to_string());
        TestResponse {
            status: outcome.status,
            text: outcome.body,
            headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Params;
    use crate::routing::{HandlerError, RouteTable};

    #[test]
    fn test_json_body() {
        let mut table = RouteTable::new();
        table
            .get("/echo", |p: &Params| -> Result<String, HandlerError> {
                serde_json::to_string(p).map_err(|e| HandlerError::failed(e.to_string()))
            })
            .unwrap();
        let client = TestClient::new(Dispatcher::new(table));

        let response = client.get("/echo?tag=a&tag=b&n=3");
        assert!(response.is_success());
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body["tag"], serde_json::json!(["a", "b"]));
        assert_eq!(body["n"], serde_json::json!(3));
        assert_eq!(response.headers["content-type"], TEXT_PLAIN);
    }

    #[test]
    fn test_not_success() {
        let client = TestClient::new(Dispatcher::new(RouteTable::new()));
        let response = client.post("/anything");
        assert!(!response.is_success());
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}
