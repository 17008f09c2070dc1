//! Route registration and lookup.
//!
//! # Responsibilities
//! - Store compiled routes grouped by HTTP method
//! - Look up the first route whose pattern matches a path
//! - Decode and coerce the matched captures
//!
//! # Design Decisions
//! - Registration order is match priority; first match wins
//! - Re-registering the same template for a method replaces the entry in place
//! - O(n) scan per method (acceptable for typical route counts)
//! - Explicit `None` for no match rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;
use percent_encoding::percent_decode_str;

use crate::params::{coerce, Params};
use crate::routing::handler::{Handler, Signature};
use crate::routing::matcher::PathPattern;
use crate::routing::RouteError;

/// A registered route.
pub struct RouteEntry {
    template: String,
    pattern: PathPattern,
    signature: Option<Signature>,
    handler: Arc<dyn Handler>,
}

impl RouteEntry {
    /// The template string exactly as registered.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("template", &self.template)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A successful lookup: the route plus its decoded, coerced path parameters.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteEntry,
    pub params: Params,
}

/// Method-keyed, ordered route table.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<Method, Vec<RouteEntry>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method` and `template`.
    pub fn register<H: Handler>(
        &mut self,
        method: Method,
        template: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        self.insert(method, template, None, Arc::new(handler))
    }

    /// Register a handler with a declared parameter signature.
    ///
    /// Every placeholder in the template must be accepted by the signature,
    /// otherwise every request to the route would fail.
    pub fn register_with<H: Handler>(
        &mut self,
        method: Method,
        template: &str,
        signature: Signature,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        self.insert(method, template, Some(signature), Arc::new(handler))
    }

    pub fn get<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::GET, template, handler)
    }

    pub fn post<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::POST, template, handler)
    }

    pub fn put<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::PUT, template, handler)
    }

    pub fn delete<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::DELETE, template, handler)
    }

    pub fn patch<H: Handler>(&mut self, template: &str, handler: H) -> Result<&mut Self, RouteError> {
        self.register(Method::PATCH, template, handler)
    }

    fn insert(
        &mut self,
        method: Method,
        template: &str,
        signature: Option<Signature>,
        handler: Arc<dyn Handler>,
    ) -> Result<&mut Self, RouteError> {
        let pattern = PathPattern::compile(template)?;

        if let Some(sig) = &signature {
            if let Some(name) = pattern.param_names().find(|n| !sig.accepts(n)) {
                return Err(RouteError::UndeclaredParam {
                    template: template.to_string(),
                    name: name.to_string(),
                });
            }
        }

        let entry = RouteEntry {
            template: template.to_string(),
            pattern,
            signature,
            handler,
        };

        let entries = self.routes.entry(method.clone()).or_default();
        match entries.iter_mut().find(|e| e.template == template) {
            Some(existing) => {
                tracing::debug!(method = %method, template = %template, "Replacing route");
                *existing = entry;
            }
            None => {
                tracing::debug!(method = %method, template = %template, "Registered route");
                entries.push(entry);
            }
        }

        Ok(self)
    }

    /// Find the first route for `method` matching `path`.
    ///
    /// `path` is expected without its query string; trailing slashes are
    /// tolerated. Captures are percent-decoded, then coerced.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        let entries = self.routes.get(method)?;
        entries.iter().find_map(|route| {
            let captures = route.pattern.matches(path)?;
            let params = captures
                .into_iter()
                .map(|(name, raw)| {
                    let decoded = percent_decode_str(raw).decode_utf8_lossy();
                    (name.to_string(), coerce(&decoded))
                })
                .collect();
            Some(RouteMatch { route, params })
        })
    }

    /// Total number of routes across all methods.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.routes.clear();
    }

    /// All (method, route) pairs; per-method order is registration order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &RouteEntry)> {
        self.routes
            .iter()
            .flat_map(|(method, entries)| entries.iter().map(move |e| (method, e)))
    }
}
