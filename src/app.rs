//! The application: registration surface and request cycle.

use http::StatusCode;
use tracing::{debug, error};

use crate::client::TestClient;
use crate::dispatch;
use crate::error::Error;
use crate::handler::{Handler, IntoHandler};
use crate::request::Request;
use crate::response::Response;
use crate::router::RouteTable;

/// Body of the default response for an unmatched path.
const NOT_FOUND_BODY: &str = "Not found.";

/// The application: a route table plus the per-request cycle that drives it.
///
/// Build it once at startup, then share it immutably — `handle` takes
/// `&self`, runs synchronously to completion, and keeps all per-request
/// state (extracted parameters, the response) local to the call, so
/// concurrent requests never contend.
///
/// ```rust
/// use vela::{App, Method, PathParams, Request, Response};
///
/// let app = App::new()
///     .route("/", |_req: &Request, res: &mut Response, _p: &PathParams| {
///         res.set_text("home");
///     });
///
/// let res = app.handle(&Request::new(Method::GET, "/"));
/// assert_eq!(res.body(), b"home");
/// ```
pub struct App {
    routes: RouteTable,
}

impl App {
    pub fn new() -> Self {
        Self {
            routes: RouteTable::new(),
        }
    }

    /// Registers a handler and returns `self` so registrations chain.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate or malformed pattern — route registration
    /// happens at startup and a broken table should fail loudly there, not
    /// at traffic time. Use [`App::register`] to handle the error instead.
    pub fn route<H, S>(mut self, pattern: &str, handler: H) -> Self
    where
        H: IntoHandler<S>,
    {
        self.register(pattern, handler)
            .unwrap_or_else(|e| panic!("{e}"));
        self
    }

    /// Fallible registration. See [`RouteTable::register`].
    pub fn register<H, S>(&mut self, pattern: &str, handler: H) -> Result<(), Error>
    where
        H: IntoHandler<S>,
    {
        self.routes.register(pattern, handler)
    }

    /// Runs one request through the cycle and returns its response.
    ///
    /// Resolve, then dispatch; an unmatched path gets the default 404 with
    /// no handler involved. A resource handler hit with a verb it does not
    /// implement is translated to `405 Method Not Allowed` here, with an
    /// `allow` header naming the verbs it does implement — the dispatcher
    /// itself reports that case as a hard error and leaves the translation
    /// to this boundary.
    pub fn handle(&self, request: &Request) -> Response {
        let mut response = Response::new();

        match self.routes.resolve(request.path()) {
            Some((handler, params)) => {
                match dispatch::invoke(handler, request.method(), request, &mut response, &params)
                {
                    Ok(()) => {}
                    Err(Error::MethodNotAllowed(method)) => {
                        debug!(%method, path = request.path(), "method not allowed");
                        method_not_allowed(&mut response, handler);
                    }
                    Err(e) => {
                        error!(path = request.path(), "dispatch failed: {e}");
                        response.set_status(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                }
            }
            None => not_found(&mut response),
        }

        debug!(
            method = %request.method(),
            path = request.path(),
            status = response.status().as_u16(),
            "handled"
        );
        response
    }

    /// An in-process client that feeds synthetic requests straight into
    /// [`App::handle`] — no socket, no server. See [`TestClient`].
    pub fn client(&self) -> TestClient<'_> {
        TestClient::new(self)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// The default-not-found policy: 404, fixed body, no handler invoked.
fn not_found(response: &mut Response) {
    response.set_status(StatusCode::NOT_FOUND);
    response.set_text(NOT_FOUND_BODY);
}

fn method_not_allowed(response: &mut Response, handler: &Handler) {
    response.set_status(StatusCode::METHOD_NOT_ALLOWED);
    response.set_text("Method not allowed.");
    if let Handler::Methods(resource) = handler {
        let allow = resource
            .allowed_methods()
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        response.insert_header("allow", allow);
    }
}
