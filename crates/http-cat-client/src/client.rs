//! http.cat HTTP client

use crate::error::{HttpCatError, Result};
use bytes::Bytes;
use code_file_cache::CacheKey;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for fetching status code images
#[derive(Debug, Clone)]
pub struct HttpCatClient {
    client: Client,
    base_url: String,
}

impl HttpCatClient {
    /// Public http.cat service
    pub const DEFAULT_BASE_URL: &'static str = "https://http.cat";

    /// Create a client for the public http.cat service with no request timeout
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a client for a service with the same `/{code}` layout
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Create a client with an optional per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the image for `key`
    pub fn image_url(&self, key: &CacheKey) -> String {
        format!("{}/{}", self.base_url, key)
    }

    /// Fetch the image for `key`, buffering the whole body.
    ///
    /// Only `200 OK` counts as success. There is no retry.
    pub async fn fetch(&self, key: &CacheKey) -> Result<Bytes> {
        let url = self.image_url(key);
        debug!(url = %url, "Fetching image from upstream");

        let response = self.client.get(&url).send().await?;

        if response.status() != StatusCode::OK {
            warn!(status = %response.status(), url = %url, "Upstream did not return the image");
            return Err(HttpCatError::Status(response.status().as_u16()));
        }

        let data = response.bytes().await?;
        debug!(url = %url, size = data.len(), "Fetched image from upstream");

        Ok(data)
    }
}

impl Default for HttpCatClient {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
