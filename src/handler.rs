//! Handler shapes and conversion.
//!
//! A route handler comes in two shapes, fixed at registration time:
//!
//! - **Function handler** — a plain callable
//!   `Fn(&Request, &mut Response, &PathParams)`. It mutates the response in
//!   place and returns nothing.
//! - **Resource handler** — a per-HTTP-method table built with the fluent
//!   [`Resource`] builder. The dispatcher selects the entry for the request
//!   method; a verb the resource does not declare is a typed lookup miss
//!   reported as [`Error::MethodNotAllowed`](crate::Error::MethodNotAllowed).
//!
//! The two shapes are a tagged union, [`Handler`], so per-request dispatch
//! is a `match` — no probing, no reflection. [`IntoHandler`] lets
//! registration accept a bare closure or a `Resource` interchangeably:
//!
//! ```rust
//! use vela::{App, PathParams, Request, Resource, Response};
//!
//! fn show(_req: &Request, res: &mut Response, params: &PathParams) {
//!     res.set_text(format!("item {}", params["id"]));
//! }
//!
//! let app = App::new()
//!     .route("/items/{id}", show)
//!     .route("/items", Resource::new()
//!         .get(|_req, res, _params| res.set_text("all items"))
//!         .post(|_req, res, _params| res.set_text("created")));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;

use crate::matcher::PathParams;
use crate::request::Request;
use crate::response::Response;

/// A shared, type-erased handler callable. `Arc` so the route table can hand
/// it to concurrent requests without copying.
pub(crate) type HandlerFn = Arc<dyn Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static>;

/// A registered handler: either a plain function or a method table.
pub enum Handler {
    Function(HandlerFn),
    Methods(Resource),
}

// ── Resource ─────────────────────────────────────────────────────────────────

/// A class-style handler: one callable per HTTP method.
///
/// Build it fluently and register it like any other handler. Methods without
/// a dedicated builder shortcut go through [`Resource::on`].
pub struct Resource {
    methods: HashMap<Method, HandlerFn>,
}

impl Resource {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Registers a callable for an arbitrary method.
    pub fn on<F>(mut self, method: Method, f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
    {
        self.methods.insert(method, Arc::new(f));
        self
    }

    pub fn get<F>(self, f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
    {
        self.on(Method::GET, f)
    }

    pub fn post<F>(self, f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
    {
        self.on(Method::POST, f)
    }

    pub fn put<F>(self, f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
    {
        self.on(Method::PUT, f)
    }

    pub fn delete<F>(self, f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
    {
        self.on(Method::DELETE, f)
    }

    pub fn patch<F>(self, f: F) -> Self
    where
        F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
    {
        self.on(Method::PATCH, f)
    }

    pub(crate) fn lookup(&self, method: &Method) -> Option<&HandlerFn> {
        self.methods.get(method)
    }

    /// The methods this resource implements, sorted for a stable `allow`
    /// header.
    pub(crate) fn allowed_methods(&self) -> Vec<&Method> {
        let mut methods: Vec<&Method> = self.methods.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }
}

impl Default for Resource {
    fn default() -> Self {
        Self::new()
    }
}

// ── IntoHandler ──────────────────────────────────────────────────────────────

/// Conversion into a registered [`Handler`].
///
/// Satisfied by any `Fn(&Request, &mut Response, &PathParams)` closure or fn
/// item, and by [`Resource`]; you never implement it yourself. The `Shape`
/// marker exists only so the function and resource impls do not overlap —
/// type inference picks it for you.
pub trait IntoHandler<Shape>: private::Sealed<Shape> {
    fn into_handler(self) -> Handler;
}

/// The sealing module: `Sealed` is private, so only the impls below can
/// satisfy [`IntoHandler`].
mod private {
    pub trait Sealed<Shape> {}
}

#[doc(hidden)]
pub struct FnShape;

#[doc(hidden)]
pub struct ResourceShape;

impl<F> private::Sealed<FnShape> for F where
    F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static
{
}

impl<F> IntoHandler<FnShape> for F
where
    F: Fn(&Request, &mut Response, &PathParams) + Send + Sync + 'static,
{
    fn into_handler(self) -> Handler {
        Handler::Function(Arc::new(self))
    }
}

impl private::Sealed<ResourceShape> for Resource {}

impl IntoHandler<ResourceShape> for Resource {
    fn into_handler(self) -> Handler {
        Handler::Methods(self)
    }
}
