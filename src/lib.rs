//! # vela
//!
//! A minimal routing and dispatch framework. Nothing more. Nothing less.
//!
//! ## The shape of it
//!
//! Routes are flat `{name}` patterns registered once at startup; each one
//! maps to either a plain function handler or a [`Resource`] with one
//! callable per HTTP method. Per request, vela builds an empty `200`
//! response, resolves the path against the table in registration order,
//! extracts the named parameters, and invokes the handler — which mutates
//! the response in place. An unmatched path is the built-in `404 Not
//! found.`; a resource hit with a verb it does not implement becomes a
//! `405` with an `allow` header.
//!
//! The hyper/tokio transport, minijinja templating, and the in-process
//! [`TestClient`] sit at the edges; the routing core itself is synchronous
//! and pure enough to drive from a unit test.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use vela::{App, PathParams, Request, Resource, Response, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = App::new()
//!         .route("/users/{id}", get_user)
//!         .route("/users", Resource::new()
//!             .get(|_req, res, _p| res.set_text("all users"))
//!             .post(create_user));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! fn get_user(_req: &Request, res: &mut Response, params: &PathParams) {
//!     res.set_json(format!(r#"{{"id":"{}"}}"#, params["id"]).into_bytes());
//! }
//!
//! fn create_user(req: &Request, res: &mut Response, _params: &PathParams) {
//!     if req.body().is_empty() {
//!         res.set_status(vela::StatusCode::BAD_REQUEST);
//!         return;
//!     }
//!     res.set_status(vela::StatusCode::CREATED);
//!     res.set_json(br#"{"id":"99"}"#.to_vec());
//! }
//! ```

mod app;
mod client;
pub mod dispatch;
mod error;
mod handler;
mod matcher;
mod request;
mod response;
mod router;
mod server;
mod templates;

pub use app::App;
pub use client::TestClient;
pub use error::Error;
pub use handler::{Handler, IntoHandler, Resource};
pub use matcher::{PathParams, Pattern};
pub use request::Request;
pub use response::Response;
pub use router::RouteTable;
pub use server::Server;
pub use templates::Templates;

// Handlers speak these types directly; re-exported so applications do not
// need their own `http` dependency.
pub use http::{Method, StatusCode};
