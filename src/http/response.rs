//! Response construction.
//!
//! # Responsibilities
//! - Turn a dispatch `Outcome` into an HTTP response
//! - Map worker failures to 500
//!
//! # Design Decisions
//! - Every body is UTF-8 plain text

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::Outcome;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, TEXT_PLAIN)], self.body).into_response()
    }
}

/// Response used when the dispatch task itself could not complete.
pub fn worker_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        "Internal Server Error",
    )
        .into_response()
}
