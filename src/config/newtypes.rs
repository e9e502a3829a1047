//! Newtype wrappers for configuration values.
//!
//! Credentials are opaque to the SDK and accepted as-is. The base URL is
//! validated on construction because every request path is appended to it.

use crate::error::ConfigError;
use std::fmt;

/// A Sellium API key, sent in the `X-API-Key` header.
///
/// The key is opaque to the SDK and is not validated. Its value is masked in
/// debug output to prevent accidental exposure in logs.
///
/// # Example
///
/// ```rust
/// use sellium_api::ApiKey;
///
/// let key = ApiKey::new("sk_live_123");
/// assert_eq!(key.as_ref(), "sk_live_123");
/// assert_eq!(format!("{key:?}"), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new API key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// The identifier of the store the API key belongs to, sent in the
/// `X-Store-ID` header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoreId(String);

impl StoreId {
    /// Creates a new store identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for StoreId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StoreId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A validated API root URL.
///
/// The URL must carry a scheme and a host. A trailing `/` is removed so that
/// request paths (which always start with `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use sellium_api::BaseUrl;
///
/// let url = BaseUrl::new("https://sellium.site/api/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://sellium.site/api/v1");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "sellium.site");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url: url.clone() });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Appends a request path to this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("super-secret-key");
        let debug_output = format!("{:?}", key);
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_credentials_are_opaque() {
        // Empty values are passed through untouched; the API decides.
        assert_eq!(ApiKey::new("").as_ref(), "");
        assert_eq!(StoreId::new("").as_ref(), "");
        assert_eq!(StoreId::from("store_42").to_string(), "store_42");
    }

    #[test]
    fn test_base_url_validates_format() {
        let url = BaseUrl::new("https://sellium.site/api/v1").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_name(), "sellium.site");

        let url = BaseUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "127.0.0.1");
    }

    #[test]
    fn test_base_url_trims_trailing_slashes() {
        let url = BaseUrl::new("https://sellium.site/api/v1//").unwrap();
        assert_eq!(url.as_ref(), "https://sellium.site/api/v1");
        assert_eq!(url.join("/store"), "https://sellium.site/api/v1/store");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("sellium.site/api/v1").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://sellium.site").is_err());
        assert!(BaseUrl::new("https:///api").is_err());
    }
}
