//! Error types for the cat cache proxy

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use code_file_cache::CacheError;
use http_cat_client::HttpCatError;
use std::fmt;

/// Methods the proxy answers, as sent in the `Allow` header
pub const ALLOWED_METHODS: &str = "GET, PUT, DELETE";

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Startup errors. Anything reaching `main` terminates the process.
#[derive(Debug)]
pub enum ProxyError {
    Cache(CacheError),
    Upstream(HttpCatError),
    Io(Box<std::io::Error>),
    Config(String),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::Cache(err) => write!(f, "Cache error: {}", err),
            ProxyError::Upstream(err) => write!(f, "Upstream error: {}", err),
            ProxyError::Io(err) => write!(f, "IO error: {}", err),
            ProxyError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProxyError::Cache(err) => Some(err),
            ProxyError::Upstream(err) => Some(err),
            ProxyError::Io(err) => Some(err.as_ref()),
            ProxyError::Config(_) => None,
        }
    }
}

impl From<CacheError> for ProxyError {
    fn from(err: CacheError) -> Self {
        ProxyError::Cache(err)
    }
}

impl From<HttpCatError> for ProxyError {
    fn from(err: HttpCatError) -> Self {
        ProxyError::Upstream(err)
    }
}

impl From<std::io::Error> for ProxyError {
    fn from(err: std::io::Error) -> Self {
        ProxyError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ProxyError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ProxyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Per-request failures. The router is the only place these become
/// status codes; everything is contained in that request's response.
#[derive(Debug)]
pub enum RequestError {
    /// Path is not `/{digits}`
    BadRequest,
    /// Not cached and the upstream fetch failed
    UpstreamMiss,
    /// DELETE of an entry that does not exist
    NotFound,
    /// Filesystem failure other than absence
    Storage(CacheError),
    /// The request body could not be received
    Body(String),
    MethodNotAllowed,
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::BadRequest => StatusCode::BAD_REQUEST,
            RequestError::UpstreamMiss | RequestError::NotFound => StatusCode::NOT_FOUND,
            RequestError::Storage(_) | RequestError::Body(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RequestError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::BadRequest => write!(
                f,
                "400 Bad Request: path must be a numeric HTTP status code (e.g. /200)"
            ),
            RequestError::UpstreamMiss => {
                write!(f, "404 Not Found (Image not found on http.cat)")
            }
            RequestError::NotFound => write!(f, "404 Not Found"),
            RequestError::Storage(err) => write!(f, "500 Internal Server Error: {}", err),
            RequestError::Body(msg) => write!(f, "500 Internal Server Error: {}", msg),
            RequestError::MethodNotAllowed => write!(f, "405 Method Not Allowed"),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut response = (
            status,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            self.to_string(),
        )
            .into_response();

        if matches!(self, RequestError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_error_display() {
        let err = ProxyError::Config("missing --cache".to_string());
        assert_eq!(format!("{}", err), "Configuration error: missing --cache");
    }

    #[test]
    fn test_cache_error_display() {
        let err = ProxyError::from(CacheError::Io(Box::new(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "permission denied",
        ))));
        assert_eq!(format!("{}", err), "Cache error: permission denied");
    }

    #[test]
    fn test_io_error_converts_to_io_variant() {
        let err: ProxyError =
            io::Error::new(io::ErrorKind::AddrInUse, "address already in use").into();
        assert!(matches!(err, ProxyError::Io(_)));
        assert_eq!(format!("{}", err), "IO error: address already in use");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(RequestError::BadRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(RequestError::UpstreamMiss.status(), StatusCode::NOT_FOUND);
        assert_eq!(RequestError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            RequestError::Storage(CacheError::Io(Box::new(io::Error::other("disk"))))
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RequestError::Body("reset".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RequestError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn test_storage_error_body_carries_detail() {
        let err = RequestError::Storage(CacheError::Io(Box::new(io::Error::other("disk full"))));
        assert_eq!(err.to_string(), "500 Internal Server Error: disk full");
    }

    #[test]
    fn test_method_not_allowed_response_has_allow_header() {
        let response = RequestError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, PUT, DELETE");
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
    }

    #[test]
    fn test_bad_request_response_has_no_allow_header() {
        let response = RequestError::BadRequest.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::ALLOW).is_none());
    }
}
