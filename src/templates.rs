//! HTML templating collaborator.
//!
//! A thin wrapper over a [`minijinja`] environment with a filesystem loader.
//! Handlers that render pages hold a shared `Templates` (an `Arc` works
//! across handler closures) and write the rendered bytes into the response:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vela::{App, PathParams, Request, Response, Templates};
//!
//! let templates = Arc::new(Templates::new("templates"));
//! let app = App::new().route(
//!     "/about",
//!     move |_req: &Request, res: &mut Response, _p: &PathParams| {
//!         match templates.render("about.html", minijinja::context! { title => "About" }) {
//!             Ok(html) => res.set_html(html),
//!             Err(_) => res.set_status(vela::StatusCode::INTERNAL_SERVER_ERROR),
//!         }
//!     },
//! );
//! ```

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;

use crate::error::Error;

/// A template environment rooted at a directory.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Loads templates from `dir`, lazily, by name relative to it.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir));
        Self { env }
    }

    /// Registers an inline template under `name`. Handy in tests and for
    /// applications too small to warrant a template directory.
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> Result<(), Error> {
        self.env.add_template_owned(name.into(), source.into())?;
        Ok(())
    }

    /// Renders `name` with `ctx` and returns the result as bytes, ready for
    /// [`Response::set_html`](crate::Response::set_html).
    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<Vec<u8>, Error> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?.into_bytes())
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            env: Environment::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_inline_template_with_context() {
        let mut templates = Templates::default();
        templates
            .add("hello.html", "<h1>Hello, {{ name }}!</h1>")
            .unwrap();

        let html = templates
            .render("hello.html", minijinja::context! { name => "world" })
            .unwrap();
        assert_eq!(html, b"<h1>Hello, world!</h1>");
    }

    #[test]
    fn missing_template_is_a_template_error() {
        let templates = Templates::default();
        let err = templates.render("nope.html", ()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }
}
