//! Cache keys

use crate::error::CacheError;
use std::fmt;
use std::str::FromStr;

/// A numeric cache key, such as `404`.
///
/// The decimal string is kept exactly as it appeared in the request, so
/// `007` and `7` are distinct entries and arbitrarily long codes never
/// overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Parse a key, accepting only a non-empty run of ASCII digits
    pub fn parse(raw: &str) -> Result<Self, CacheError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CacheError::InvalidKey(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CacheKey {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys() {
        assert_eq!(CacheKey::parse("200").unwrap().as_str(), "200");
        assert_eq!(CacheKey::parse("0").unwrap().as_str(), "0");
        assert_eq!(CacheKey::parse("007").unwrap().as_str(), "007");
        assert!(CacheKey::parse("123456789012345678901234567890").is_ok());
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        for raw in ["", "abc", "20a", "-1", "+1", "1.5", " 200", "200 ", "200/1"] {
            assert!(CacheKey::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        // Arabic-Indic digits
        assert!(CacheKey::parse("٤٠٤").is_err());
    }

    #[test]
    fn test_from_str_and_display() {
        let key: CacheKey = "418".parse().unwrap();
        assert_eq!(key.to_string(), "418");
    }
}
