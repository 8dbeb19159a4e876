//! Incoming request context.

use bytes::Bytes;
use http::Method;

/// An inbound HTTP request.
///
/// Owned by the transport; the routing core only reads it. Path parameters
/// are not part of the request — they are extracted per match and handed to
/// the handler separately.
pub struct Request {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl Request {
    /// Builds a request with no headers and an empty body.
    ///
    /// The [`Server`](crate::Server) fills in headers and body from the wire;
    /// this constructor is mainly for the test client and for direct calls to
    /// [`App::handle`](crate::App::handle).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// Replaces the body. Consumes and returns `self` so construction chains.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Appends a header. Consumes and returns `self` so construction chains.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
