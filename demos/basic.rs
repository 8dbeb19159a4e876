//! Minimal vela example — a function route, a resource route, and a
//! templated page.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/users/42
//!   curl -X POST http://localhost:3000/users -d '{"name":"alice"}'
//!   curl -X PUT http://localhost:3000/users        # 405, allow: GET, POST
//!   curl http://localhost:3000/hello/world
//!   curl http://localhost:3000/missing             # 404 Not found.

use std::sync::Arc;

use vela::{App, PathParams, Request, Resource, Response, Server, StatusCode, Templates};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut templates = Templates::default();
    templates
        .add("hello.html", "<h1>Hello, {{ name }}!</h1>")
        .expect("template failed to parse");
    let templates = Arc::new(templates);

    let app = App::new()
        .route("/users/{id}", get_user)
        .route(
            "/users",
            Resource::new()
                .get(|_req, res, _p| res.set_json(br#"[{"id":"42"}]"#.to_vec()))
                .post(create_user),
        )
        .route(
            "/hello/{name}",
            move |_req: &Request, res: &mut Response, params: &PathParams| {
                match templates.render("hello.html", minijinja::context! { name => params["name"].as_str() }) {
                    Ok(html) => res.set_html(html),
                    Err(_) => res.set_status(StatusCode::INTERNAL_SERVER_ERROR),
                }
            },
        );

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /users/{id}
fn get_user(_req: &Request, res: &mut Response, params: &PathParams) {
    res.set_json(format!(r#"{{"id":"{}","name":"alice"}}"#, params["id"]).into_bytes());
}

// POST /users
fn create_user(req: &Request, res: &mut Response, _params: &PathParams) {
    if req.body().is_empty() {
        res.set_status(StatusCode::BAD_REQUEST);
        return;
    }
    res.set_status(StatusCode::CREATED);
    res.insert_header("location", "/users/99");
    res.set_json(br#"{"id":"99","name":"new_user"}"#.to_vec());
}
