//! Error types for the file cache

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CacheError {
    /// No entry exists at the requested location
    NotFound,
    /// Any other filesystem failure
    Io(Box<io::Error>),
    /// The raw string is not a valid cache key
    InvalidKey(String),
}

impl CacheError {
    /// True when the entry is simply absent, as opposed to a storage failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound)
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NotFound => write!(f, "Cache entry not found"),
            CacheError::Io(err) => write!(f, "{}", err),
            CacheError::InvalidKey(raw) => write!(f, "Invalid cache key: {:?}", raw),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            CacheError::NotFound
        } else {
            CacheError::Io(Box::new(err))
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
