//! http.cat client
//!
//! Fetches the image for a numeric status code from `https://http.cat`
//! (or any service with the same `/{code}` layout).

pub mod client;
pub mod error;

pub use client::HttpCatClient;
pub use error::{HttpCatError, Result};
