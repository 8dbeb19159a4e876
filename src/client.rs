//! In-process test client.
//!
//! Feeds synthetic requests straight into the request cycle — no socket, no
//! server task, no async runtime. The response you get back is exactly what
//! the transport would have serialized.
//!
//! ```rust
//! use vela::{App, PathParams, Request, Response, StatusCode};
//!
//! let app = App::new()
//!     .route("/ping", |_req: &Request, res: &mut Response, _p: &PathParams| {
//!         res.set_text("pong");
//!     });
//!
//! let client = app.client();
//! assert_eq!(client.get("/ping").body(), b"pong");
//! assert_eq!(client.get("/nope").status(), StatusCode::NOT_FOUND);
//! ```

use bytes::Bytes;
use http::Method;

use crate::app::App;
use crate::request::Request;
use crate::response::Response;

/// A borrowed client over an [`App`]. Obtain via [`App::client`].
pub struct TestClient<'a> {
    app: &'a App,
}

impl<'a> TestClient<'a> {
    pub(crate) fn new(app: &'a App) -> Self {
        Self { app }
    }

    /// Runs an arbitrary request through the full request cycle.
    pub fn request(&self, request: Request) -> Response {
        self.app.handle(&request)
    }

    pub fn get(&self, path: &str) -> Response {
        self.request(Request::new(Method::GET, path))
    }

    pub fn post(&self, path: &str, body: impl Into<Bytes>) -> Response {
        self.request(Request::new(Method::POST, path).with_body(body))
    }

    pub fn put(&self, path: &str, body: impl Into<Bytes>) -> Response {
        self.request(Request::new(Method::PUT, path).with_body(body))
    }

    pub fn delete(&self, path: &str) -> Response {
        self.request(Request::new(Method::DELETE, path))
    }
}
