//! Query string decoding.
//!
//! # Responsibilities
//! - Split `application/x-www-form-urlencoded` pairs
//! - Percent-decode keys and values, then coerce values
//! - Collapse repeated keys into ordered lists
//!
//! # Design Decisions
//! - Malformed input degrades, never errors: `flag` and `flag=` both give `""`
//! - Empty pairs (`a=1&&b=2`) are skipped
//! - A key seen once maps to a scalar, never a one-element list

use std::collections::HashMap;

use url::form_urlencoded;

use crate::params::value::{coerce, Value};
use crate::params::Params;

/// Decode a raw query string (without the leading `?`) into typed parameters.
pub fn decode_query(raw: &str) -> Params {
    if raw.is_empty() {
        return Params::new();
    }

    let mut grouped: HashMap<String, Vec<Value>> = HashMap::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        grouped
            .entry(key.into_owned())
            .or_default()
            .push(coerce(&value));
    }

    grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                values.swap_remove(0)
            } else {
                Value::List(values)
            };
            (key, value)
        })
        .collect()
}
