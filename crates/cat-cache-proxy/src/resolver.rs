//! Maps request paths to cache keys and entry locations

use crate::error::RequestError;
use code_file_cache::{CacheKey, FileCache};
use std::path::PathBuf;

/// A validated request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub key: CacheKey,
    pub file_path: PathBuf,
}

/// Resolve a request target such as `/404` against the cache.
///
/// The target (path plus any query string) must be a single `/` followed
/// by one or more ASCII digits. Anything else, including `/404?x=1` and
/// `/404?`, is a bad request and has no side effects.
pub fn resolve(raw_path: &str, cache: &FileCache) -> Result<ResolvedPath, RequestError> {
    let raw_key = raw_path
        .strip_prefix('/')
        .ok_or(RequestError::BadRequest)?;
    let key = CacheKey::parse(raw_key).map_err(|_| RequestError::BadRequest)?;
    let file_path = cache.entry_path(&key);

    Ok(ResolvedPath { key, file_path })
}
