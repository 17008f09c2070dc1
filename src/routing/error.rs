//! Routing error types.

use thiserror::Error;

use crate::routing::handler::HandlerError;

/// Errors raised while registering a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The same placeholder name appears twice in one template.
    #[error("duplicate placeholder '{{{name}}}' in template '{template}'")]
    DuplicateParam { template: String, name: String },

    /// A template placeholder is not part of the handler's declared signature.
    #[error("placeholder '{{{name}}}' in template '{template}' is not declared by the handler signature")]
    UndeclaredParam { template: String, name: String },
}

/// Why a matched route failed to produce a response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The handler (or its signature check) returned an error.
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// The handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),
}
