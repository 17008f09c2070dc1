//! Request handling.
//!
//! # Responsibilities
//! - Name the request ID header
//! - Recover the raw request target (path + query) handed to the dispatcher
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The target is passed through undecoded; decoding belongs to routing

use axum::http::{HeaderName, Uri};

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The origin-form target of `uri`: path plus `?query` when present.
pub fn request_target(uri: &Uri) -> String {
    match uri.path_and_query() {
        Some(pq) => pq.as_str().to_string(),
        None => uri.path().to_string(),
    }
}
