//! Read-through caching proxy for http.cat
//!
//! `GET /{code}` serves a cached image or fetches it from the upstream and
//! stores it, `PUT /{code}` writes an image into the cache directly and
//! `DELETE /{code}` removes one.

pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
pub mod upstream;

pub use config::{Args, ProxyConfig};
pub use error::{ProxyError, RequestError, Result};
pub use server::{create_router, start_server, ServerState, SharedState};
pub use upstream::Upstream;
