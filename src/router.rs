//! The route table.
//!
//! A flat list of `(pattern, handler)` pairs. Registration happens once at
//! startup and preserves insertion order; resolution is a linear scan that
//! returns the first structurally matching pattern. Patterns are expected to
//! be non-overlapping — that makes lookup independent of registration order —
//! and overlap is deliberately not validated. What *is* validated: a pattern
//! registers at most once, and it compiles.

use crate::error::Error;
use crate::handler::{Handler, IntoHandler};
use crate::matcher::{PathParams, Pattern};

struct Route {
    pattern: Pattern,
    handler: Handler,
}

/// Mapping from path pattern to handler.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers `handler` under `pattern`.
    ///
    /// Fails with [`Error::DuplicateRoute`] if the same template text is
    /// already registered, and [`Error::InvalidPattern`] if the template
    /// does not compile. On failure the table is left unchanged.
    pub fn register<H, S>(&mut self, pattern: &str, handler: H) -> Result<(), Error>
    where
        H: IntoHandler<S>,
    {
        if self.routes.iter().any(|r| r.pattern.as_str() == pattern) {
            return Err(Error::DuplicateRoute(pattern.to_owned()));
        }
        let pattern = Pattern::parse(pattern)?;
        self.routes.push(Route {
            pattern,
            handler: handler.into_handler(),
        });
        Ok(())
    }

    /// Resolves a request path to its handler and extracted parameters.
    ///
    /// Scans routes in registration order and returns the first match;
    /// `None` means no pattern matched, which is not an error — the request
    /// cycle turns it into the default 404.
    pub fn resolve(&self, path: &str) -> Option<(&Handler, PathParams)> {
        self.routes
            .iter()
            .find_map(|r| r.pattern.matches(path).map(|params| (&r.handler, params)))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;
    use crate::{Method, dispatch};

    fn tag(text: &'static str) -> impl Fn(&Request, &mut Response, &PathParams) {
        move |_req, res, _params| res.set_text(text)
    }

    fn invoke(table: &RouteTable, path: &str) -> Option<String> {
        let (handler, params) = table.resolve(path)?;
        let req = Request::new(Method::GET, path);
        let mut res = Response::new();
        dispatch::invoke(handler, &Method::GET, &req, &mut res, &params).unwrap();
        Some(String::from_utf8_lossy(res.body()).into_owned())
    }

    #[test]
    fn duplicate_pattern_is_rejected_and_table_unchanged() {
        let mut table = RouteTable::new();
        table.register("/home", tag("first")).unwrap();
        let err = table.register("/home", tag("second")).unwrap_err();
        assert!(matches!(err, Error::DuplicateRoute(p) if p == "/home"));
        assert_eq!(table.len(), 1);
        assert_eq!(invoke(&table, "/home").unwrap(), "first");
    }

    #[test]
    fn invalid_pattern_is_rejected_and_table_unchanged() {
        let mut table = RouteTable::new();
        let err = table.register("/users/{id", tag("broken")).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn resolve_extracts_params_for_the_registered_handler() {
        let mut table = RouteTable::new();
        table.register("/a/{x}/b/{y}", tag("ab")).unwrap();

        let (_, params) = table.resolve("/a/1/b/two").unwrap();
        assert_eq!(params["x"], "1");
        assert_eq!(params["y"], "two");
    }

    #[test]
    fn resolve_is_registration_order_independent_for_disjoint_patterns() {
        for flipped in [false, true] {
            let mut table = RouteTable::new();
            let (first, second) = if flipped {
                (("/users/{id}", tag("user")), ("/posts/{id}", tag("post")))
            } else {
                (("/posts/{id}", tag("post")), ("/users/{id}", tag("user")))
            };
            table.register(first.0, first.1).unwrap();
            table.register(second.0, second.1).unwrap();

            assert_eq!(invoke(&table, "/users/3").unwrap(), "user");
            assert_eq!(invoke(&table, "/posts/3").unwrap(), "post");
        }
    }

    #[test]
    fn resolve_returns_none_when_nothing_matches() {
        let mut table = RouteTable::new();
        table.register("/users/{id}", tag("user")).unwrap();
        assert!(table.resolve("/missing").is_none());
        assert!(table.resolve("/users/5/extra").is_none());
    }
}
