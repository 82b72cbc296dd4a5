//! Upstream image source used on cache misses

use async_trait::async_trait;
use bytes::Bytes;
use code_file_cache::CacheKey;
use http_cat_client::HttpCatClient;

/// Something that can produce the image for a key when it is not cached
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, key: &CacheKey) -> http_cat_client::Result<Bytes>;
}

#[async_trait]
impl Upstream for HttpCatClient {
    async fn fetch(&self, key: &CacheKey) -> http_cat_client::Result<Bytes> {
        HttpCatClient::fetch(self, key).await
    }
}
