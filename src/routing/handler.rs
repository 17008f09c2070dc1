//! Route handler contract.
//!
//! # Responsibilities
//! - Define what a handler is: `&Params` in, displayable body out
//! - Declare optional parameter signatures checked before invocation
//!
//! # Design Decisions
//! - Handlers are plain closures or functions; no extractor machinery
//! - A handler may fail with `HandlerError`; the dispatcher contains it
//! - Signatures make missing/unexpected names a deterministic failure,
//!   validated against the template when the route is registered

use std::fmt;

use thiserror::Error;

use crate::params::{Params, Value};

/// Errors a handler (or its parameter signature) can report.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required parameter was not supplied.
    #[error("missing required parameter '{0}'")]
    MissingParam(String),

    /// A parameter was supplied that the handler does not accept.
    #[error("unexpected parameter '{0}'")]
    UnexpectedParam(String),

    /// A parameter had the wrong type.
    #[error("parameter '{name}' must be {expected}, got {found}")]
    InvalidParam {
        name: String,
        expected: &'static str,
        found: String,
    },

    /// Any other failure inside the handler.
    #[error("{0}")]
    Failed(String),
}

impl HandlerError {
    pub fn invalid(name: &str, expected: &'static str, value: &Value) -> Self {
        HandlerError::InvalidParam {
            name: name.to_string(),
            expected,
            found: format!("{} '{}'", value.kind(), value),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into())
    }
}

/// Something that can answer a request given its merged parameters.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, params: &Params) -> Result<String, HandlerError>;
}

impl<F, R> Handler for F
where
    F: Fn(&Params) -> Result<R, HandlerError> + Send + Sync + 'static,
    R: fmt::Display,
{
    fn call(&self, params: &Params) -> Result<String, HandlerError> {
        (self)(params).map(|body| body.to_string())
    }
}

/// Declared parameter names for a handler.
///
/// Every required name must be present; any name outside required ∪ optional
/// is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    required: Vec<String>,
    optional: Vec<String>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.optional.push(name.into());
        self
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.required.iter().chain(&self.optional).any(|n| n == name)
    }

    /// Check a merged parameter set against this signature.
    pub fn check(&self, params: &Params) -> Result<(), HandlerError> {
        if let Some(missing) = self.required.iter().find(|n| !params.contains(n)) {
            return Err(HandlerError::MissingParam(missing.clone()));
        }

        // Sorted so the reported name does not depend on hash order.
        let mut unexpected: Vec<&str> = params.keys().filter(|k| !self.accepts(k)).collect();
        unexpected.sort_unstable();
        match unexpected.first() {
            Some(name) => Err(HandlerError::UnexpectedParam(name.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_handler() {
        let handler = |p: &Params| -> Result<i64, HandlerError> { Ok(p.require_i64("n")? * 2) };
        let mut params = Params::new();
        params.insert("n", 21_i64);
        assert_eq!(Handler::call(&handler, &params).unwrap(), "42");
    }

    #[test]
    fn test_signature_missing() {
        let sig = Signature::new().required("name");
        let err = sig.check(&Params::new()).unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter 'name'");
    }

    #[test]
    fn test_signature_unexpected() {
        let sig = Signature::new().required("id").optional("active");
        let mut params = Params::new();
        params.insert("id", 1_i64);
        params.insert("active", true);
        assert!(sig.check(&params).is_ok());

        params.insert("zzz", "x");
        params.insert("extra", "y");
        let err = sig.check(&params).unwrap_err();
        assert!(matches!(err, HandlerError::UnexpectedParam(ref n) if n == "extra"));
    }

    #[test]
    fn test_optional_may_be_absent() {
        let sig = Signature::new().optional("limit");
        assert!(sig.check(&Params::new()).is_ok());
    }
}
