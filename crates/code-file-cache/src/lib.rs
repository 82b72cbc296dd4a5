//! File-based image cache keyed by numeric codes
//!
//! Each cache entry is a single file named `{code}.jpeg` inside the cache
//! root. There is no metadata, no expiry and no eviction: an entry lives
//! until it is overwritten or deleted.

mod error;
mod key;
mod store;

pub use error::{CacheError, Result};
pub use key::CacheKey;
pub use store::{FileCache, ENTRY_EXTENSION};
