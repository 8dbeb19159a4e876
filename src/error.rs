//! Unified error type.

use std::fmt;

use http::Method;

/// The error type returned by vela's fallible operations.
///
/// Routing outcomes that are part of normal traffic — a path matching no
/// registered pattern — are not errors; they surface as the default 404
/// response. `Error` covers registration mistakes (caught at startup),
/// dispatch to a verb a resource does not implement, template failures,
/// and transport I/O.
#[derive(Debug)]
pub enum Error {
    /// A pattern was registered twice. Raised by the second `register` call;
    /// the route table is left exactly as it was before the call.
    DuplicateRoute(String),
    /// A pattern failed to compile at registration time (unclosed brace,
    /// empty or duplicate placeholder name).
    InvalidPattern { pattern: String, reason: String },
    /// A resource handler was dispatched a method it does not implement.
    /// Carries the offending method so callers can log or translate it.
    MethodNotAllowed(Method),
    /// Template loading or rendering failed.
    Template(minijinja::Error),
    /// Binding to a port or accepting a connection failed.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoute(pattern) => {
                write!(f, "route `{pattern}` already exists")
            }
            Self::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern `{pattern}`: {reason}")
            }
            Self::MethodNotAllowed(method) => {
                write!(f, "method not allowed: {method}")
            }
            Self::Template(e) => write!(f, "template: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Template(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<minijinja::Error> for Error {
    fn from(e: minijinja::Error) -> Self {
        Self::Template(e)
    }
}
