//! Error types for the http.cat client

use std::fmt;

#[derive(Debug)]
pub enum HttpCatError {
    /// Transport-level failure (connect, TLS, body read)
    Http(Box<reqwest::Error>),
    /// The upstream answered with something other than 200 OK
    Status(u16),
}

impl fmt::Display for HttpCatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpCatError::Http(err) => write!(f, "HTTP error: {}", err),
            HttpCatError::Status(code) => write!(f, "Upstream returned status {}", code),
        }
    }
}

impl std::error::Error for HttpCatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HttpCatError::Http(err) => Some(err.as_ref()),
            HttpCatError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for HttpCatError {
    fn from(err: reqwest::Error) -> Self {
        HttpCatError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, HttpCatError>;
