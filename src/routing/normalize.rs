//! Path normalization and request-target splitting.

use axum::http::Uri;

/// Strip trailing slashes, leaving the root path `/` untouched.
///
/// Templates and request paths both pass through here, so `/users/` and
/// `/users` are the same route.
pub fn normalize(path: &str) -> String {
    if path == "/" {
        return path.to_string();
    }
    path.trim_end_matches('/').to_string()
}

/// A request target split into its normalized path and raw query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    pub query: String,
}

impl Target {
    /// Split a raw request target (`/path?query#fragment`).
    ///
    /// Absolute-form targets (`http://host/path?query`) contribute only their
    /// path and query. The fragment is always dropped.
    pub fn parse(raw: &str) -> Self {
        let without_fragment = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };

        if without_fragment.contains("://") {
            if let Ok(uri) = without_fragment.parse::<Uri>() {
                return Self {
                    path: normalize(uri.path()),
                    query: uri.query().unwrap_or_default().to_string(),
                };
            }
        }

        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, query),
            None => (without_fragment, ""),
        };

        Self {
            path: normalize(path),
            query: query.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_root_untouched() {
        assert_eq!(normalize("/"), "/");
    }

    #[test]
    fn test_trailing_slashes_stripped() {
        assert_eq!(normalize("/users/"), "/users");
        assert_eq!(normalize("/users///"), "/users");
        assert_eq!(normalize("/users"), "/users");
    }

    #[test]
    fn test_empty_and_slash_runs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("//"), "");
    }

    #[test]
    fn test_target_split() {
        let t = Target::parse("/users/42/?id=999&x=1#top");
        assert_eq!(t.path, "/users/42");
        assert_eq!(t.query, "id=999&x=1");

        let t = Target::parse("/plain");
        assert_eq!(t.path, "/plain");
        assert_eq!(t.query, "");

        let t = Target::parse("/?");
        assert_eq!(t.path, "/");
        assert_eq!(t.query, "");
    }

    #[test]
    fn test_target_absolute_form() {
        let t = Target::parse("http://example.com/users/7/?active=true");
        assert_eq!(t.path, "/users/7");
        assert_eq!(t.query, "active=true");
    }

    #[test]
    fn test_target_keeps_question_marks_in_query() {
        let t = Target::parse("/search?q=why?");
        assert_eq!(t.path, "/search");
        assert_eq!(t.query, "q=why?");
    }

    proptest! {
        #[test]
        fn prop_trailing_slash_is_idempotent(p in "(/[a-z0-9{}]{1,8}){1,5}") {
            prop_assert_eq!(normalize(&format!("{}/", p)), normalize(&p));
            prop_assert_eq!(normalize(&p), p);
        }
    }
}
