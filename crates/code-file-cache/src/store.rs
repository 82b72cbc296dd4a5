//! File-backed cache store

use crate::error::{CacheError, Result};
use crate::key::CacheKey;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Extension appended to every cache entry filename
pub const ENTRY_EXTENSION: &str = "jpeg";

/// A cache that stores one file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileCache {
    /// Directory where cached images are stored
    root: PathBuf,
}

impl FileCache {
    /// Create a new file cache rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Initialize the cache by ensuring the cache directory exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CacheError::Io(Box::new(e)))?;
        info!(cache_dir = ?self.root, "Cache initialized");
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the entry for `key`: `{root}/{key}.jpeg`
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.root.join(format!("{}.{}", key, ENTRY_EXTENSION))
    }

    /// Read the stored bytes at `path`
    pub async fn read(&self, path: &Path) -> Result<Bytes> {
        let data = fs::read(path).await?;
        debug!(path = ?path, size = data.len(), "Read cache entry");
        Ok(Bytes::from(data))
    }

    /// Write `data` to `path`, replacing any previous entry.
    ///
    /// This is a plain write, so a concurrent reader may observe a partial
    /// file while it is in progress. Every failure, including a missing
    /// cache root, is reported as [`CacheError::Io`].
    pub async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        fs::write(path, data)
            .await
            .map_err(|e| CacheError::Io(Box::new(e)))?;
        debug!(path = ?path, size = data.len(), "Wrote cache entry");
        Ok(())
    }

    /// Remove the entry at `path`
    pub async fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).await?;
        debug!(path = ?path, "Deleted cache entry");
        Ok(())
    }
}
