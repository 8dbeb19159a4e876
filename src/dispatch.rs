//! Handler invocation.
//!
//! The dispatcher bridges a resolved handler and the request it was resolved
//! for. Function handlers are called directly. Resource handlers first select
//! the callable registered for the request method; a missing entry is a hard
//! [`Error::MethodNotAllowed`], never swallowed here — the request cycle
//! decides how to surface it.
//!
//! Dispatch itself sets no response field. Whatever the handler does to the
//! response is the whole outcome.

use http::Method;

use crate::error::Error;
use crate::handler::Handler;
use crate::matcher::PathParams;
use crate::request::Request;
use crate::response::Response;

/// Invokes `handler` for `method` against a request/response pair.
pub fn invoke(
    handler: &Handler,
    method: &Method,
    request: &Request,
    response: &mut Response,
    params: &PathParams,
) -> Result<(), Error> {
    match handler {
        Handler::Function(f) => {
            f(request, response, params);
            Ok(())
        }
        Handler::Methods(resource) => {
            let f = resource
                .lookup(method)
                .ok_or_else(|| Error::MethodNotAllowed(method.clone()))?;
            f(request, response, params);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{IntoHandler, Resource};

    fn request(method: Method) -> Request {
        Request::new(method, "/items/7")
    }

    fn params() -> PathParams {
        PathParams::from([("id".to_owned(), "7".to_owned())])
    }

    #[test]
    fn function_handler_is_called_directly() {
        let handler = (|_req: &Request, res: &mut Response, params: &PathParams| {
            res.set_text(format!("item {}", params["id"]));
        })
        .into_handler();

        let mut res = Response::new();
        invoke(&handler, &Method::GET, &request(Method::GET), &mut res, &params()).unwrap();
        assert_eq!(res.body(), b"item 7");
    }

    #[test]
    fn resource_selects_the_method_entry() {
        let handler = Resource::new()
            .get(|_req, res: &mut Response, _p| res.set_text("got"))
            .post(|_req, res: &mut Response, _p| res.set_text("posted"))
            .into_handler();

        let mut res = Response::new();
        invoke(&handler, &Method::GET, &request(Method::GET), &mut res, &params()).unwrap();
        assert_eq!(res.body(), b"got");

        let mut res = Response::new();
        invoke(&handler, &Method::POST, &request(Method::POST), &mut res, &params()).unwrap();
        assert_eq!(res.body(), b"posted");
    }

    #[test]
    fn undeclared_method_is_a_hard_error_carrying_the_method() {
        let handler = Resource::new()
            .get(|_req, res: &mut Response, _p| res.set_text("got"))
            .into_handler();

        let mut res = Response::new();
        let err = invoke(&handler, &Method::PUT, &request(Method::PUT), &mut res, &params())
            .unwrap_err();
        match err {
            Error::MethodNotAllowed(method) => assert_eq!(method, Method::PUT),
            other => panic!("unexpected error: {other}"),
        }
        // The dispatcher touched nothing on the response.
        assert_eq!(res.status(), http::StatusCode::OK);
        assert!(res.body().is_empty());
    }
}
