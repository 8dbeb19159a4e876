//! Mutable response context.
//!
//! The request cycle creates one [`Response`] per request — `200 OK`, no
//! headers, empty body — and hands it to the matched handler by mutable
//! reference. Handlers set status, headers, and body in place; nothing is
//! returned from a handler. After the cycle completes, the transport
//! serializes whatever state the response carries.

use bytes::Bytes;
use http::{HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;
use tracing::warn;

/// An outbound HTTP response, mutated in place by handlers.
///
/// ```rust
/// use vela::{Request, Response, StatusCode};
/// # use vela::PathParams;
///
/// fn create_user(_req: &Request, res: &mut Response, _params: &PathParams) {
///     res.set_status(StatusCode::CREATED);
///     res.insert_header("location", "/users/99");
///     res.set_json(br#"{"id":"99"}"#.to_vec());
/// }
/// ```
pub struct Response {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// The empty response shell: `200 OK`, no headers, no body.
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Sets a header, replacing an existing one with the same name.
    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some((_, v)) => *v = value,
            None => self.headers.push((name.to_owned(), value)),
        }
    }

    /// Sets a plain-text body (`text/plain; charset=utf-8`).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.set_body("text/plain; charset=utf-8", text.into().into_bytes());
    }

    /// Sets a JSON body (`application/json`). Pass bytes from your
    /// serializer directly, e.g. `serde_json::to_vec(&user).unwrap()`.
    pub fn set_json(&mut self, body: impl Into<Vec<u8>>) {
        self.set_body("application/json", body);
    }

    /// Sets an HTML body (`text/html; charset=utf-8`) — the natural sink for
    /// [`Templates::render`](crate::Templates::render) output.
    pub fn set_html(&mut self, body: impl Into<Vec<u8>>) {
        self.set_body("text/html; charset=utf-8", body);
    }

    /// Sets the body with an explicit content type.
    pub fn set_body(&mut self, content_type: &str, body: impl Into<Vec<u8>>) {
        self.insert_header("content-type", content_type);
        self.body = body.into();
    }

    /// Converts into the `http` response the hyper transport serializes.
    /// Headers that are not valid on the wire are dropped with a warning.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut response = http::Response::new(Full::new(Bytes::from(self.body)));
        *response.status_mut() = self.status;
        let map = response.headers_mut();
        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    map.append(name, value);
                }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        response
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_response_is_empty_200() {
        let res = Response::new();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().is_empty());
        assert!(res.body().is_empty());
    }

    #[test]
    fn insert_header_replaces_case_insensitively() {
        let mut res = Response::new();
        res.insert_header("Content-Type", "text/plain");
        res.insert_header("content-type", "application/json");
        assert_eq!(res.headers().len(), 1);
        assert_eq!(res.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn body_setters_stamp_content_type() {
        let mut res = Response::new();
        res.set_text("hello");
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert_eq!(res.body(), b"hello");

        res.set_json(br#"{"ok":true}"#.to_vec());
        assert_eq!(res.header("content-type"), Some("application/json"));
    }
}
