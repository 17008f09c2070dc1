//! Request parameter subsystem.
//!
//! # Data Flow
//! ```text
//! raw query string
//!     → query.rs (split pairs, percent-decode)
//!     → value.rs (coerce each value)
//!     → Params (name → Value)
//!
//! raw path captures (from routing)
//!     → percent-decode
//!     → value.rs (coerce)
//!     → Params, merged over the query Params
//! ```
//!
//! # Design Decisions
//! - A fresh `Params` per request, never shared
//! - Merging is directional: the argument overrides the receiver

pub mod query;
pub mod value;

pub use query::decode_query;
pub use value::{coerce, Value};

use std::collections::hash_map;
use std::collections::HashMap;

use serde::Serialize;

use crate::routing::HandlerError;

/// Named parameters handed to a route handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params {
    inner: HashMap<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.inner.remove(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Value> {
        self.inner.iter()
    }

    /// Overlay `other` onto `self`; on a name clash `other` wins.
    pub fn merge(&mut self, other: Params) {
        self.inner.extend(other.inner);
    }

    /// Look up a parameter the handler cannot do without.
    pub fn require(&self, name: &str) -> Result<&Value, HandlerError> {
        self.get(name)
            .ok_or_else(|| HandlerError::MissingParam(name.to_string()))
    }

    pub fn require_i64(&self, name: &str) -> Result<i64, HandlerError> {
        let value = self.require(name)?;
        value
            .as_i64()
            .ok_or_else(|| HandlerError::invalid(name, "int", value))
    }

    pub fn require_f64(&self, name: &str) -> Result<f64, HandlerError> {
        let value = self.require(name)?;
        value
            .as_f64()
            .ok_or_else(|| HandlerError::invalid(name, "float", value))
    }

    pub fn require_bool(&self, name: &str) -> Result<bool, HandlerError> {
        let value = self.require(name)?;
        value
            .as_bool()
            .ok_or_else(|| HandlerError::invalid(name, "bool", value))
    }

    pub fn require_str(&self, name: &str) -> Result<&str, HandlerError> {
        let value = self.require(name)?;
        value
            .as_str()
            .ok_or_else(|| HandlerError::invalid(name, "str", value))
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_argument_wins() {
        let mut query = Params::new();
        query.insert("id", 999_i64);
        query.insert("active", true);

        let mut path = Params::new();
        path.insert("id", 42_i64);

        query.merge(path);
        assert_eq!(query.get("id"), Some(&Value::Int(42)));
        assert_eq!(query.get("active"), Some(&Value::Bool(true)));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_require_missing() {
        let params = Params::new();
        let err = params.require("name").unwrap_err();
        assert!(matches!(err, HandlerError::MissingParam(ref n) if n == "name"));
    }

    #[test]
    fn test_require_typed() {
        let mut params = Params::new();
        params.insert("id", 7_i64);
        params.insert("name", "bob");

        assert_eq!(params.require_i64("id").unwrap(), 7);
        assert_eq!(params.require_f64("id").unwrap(), 7.0);
        assert_eq!(params.require_str("name").unwrap(), "bob");

        let err = params.require_i64("name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parameter 'name' must be int, got str 'bob'"
        );
    }
}
