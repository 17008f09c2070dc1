//! Path template compilation and matching.
//!
//! # Responsibilities
//! - Compile `/users/{id}` style templates into segment lists
//! - Match normalized paths segment by segment
//! - Return raw captures keyed by placeholder name
//!
//! # Design Decisions
//! - Whole-path match only; prefixes never match
//! - Literal segments compare byte-for-byte (case-sensitive)
//! - A placeholder spans exactly one non-empty segment
//! - Only a segment that is entirely `{name}` is a placeholder;
//!   anything else, braces included, is literal text
//! - No regex: matching is a single linear pass

use crate::routing::normalize::normalize;
use crate::routing::RouteError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some(name) if is_param_name(name) => Segment::Param(name.to_string()),
            _ => Segment::Literal(raw.to_string()),
        }
    }
}

fn is_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Compiled form of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template. Fails if a placeholder name repeats.
    pub fn compile(template: &str) -> Result<Self, RouteError> {
        let normalized = normalize(template);
        let segments: Vec<Segment> = normalized.split('/').map(Segment::parse).collect();

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) = segment {
                if seen.contains(&name.as_str()) {
                    return Err(RouteError::DuplicateParam {
                        template: template.to_string(),
                        name: name.clone(),
                    });
                }
                seen.push(name);
            }
        }

        Ok(Self { segments })
    }

    /// Placeholder names in template order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// True if the template has no placeholders.
    pub fn is_static(&self) -> bool {
        self.param_names().next().is_none()
    }

    /// Match a path, returning raw (undecoded) captures on success.
    pub fn matches<'p>(&self, path: &'p str) -> Option<Vec<(&str, &'p str)>> {
        let path = path_without_trailing_slash(path);

        let mut captures = Vec::new();
        let mut parts = path.split('/');
        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(text) => {
                    if text != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    captures.push((name.as_str(), part));
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(captures)
    }
}

/// Borrowing twin of `normalize`, so captures can point into the caller's path.
fn path_without_trailing_slash(path: &str) -> &str {
    if path == "/" {
        path
    } else {
        path.trim_end_matches('/')
    }
}
