//! Configuration types for the Sellium API SDK.
//!
//! This module provides the configuration used to construct a client.
//!
//! # Overview
//!
//! - [`SelliumConfig`]: The immutable configuration held by a client
//! - [`SelliumConfigBuilder`]: A builder for constructing [`SelliumConfig`] instances
//! - [`ClientOption`]: A single override, applied in order after the defaults
//! - [`ApiKey`], [`StoreId`]: Credentials sent with every request
//! - [`BaseUrl`]: The validated API root
//!
//! # Example
//!
//! ```rust
//! use sellium_api::{BaseUrl, ClientOption, SelliumConfig};
//!
//! let config = SelliumConfig::builder()
//!     .api_key("sk_live_123")
//!     .store_id("store_42")
//!     .option(ClientOption::UserAgent("my-app/2.0".to_string()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.user_agent(), "my-app/2.0");
//! assert_eq!(config.base_url().as_ref(), "https://sellium.site/api/v1");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, StoreId};

use std::time::Duration;

use crate::clients::SDK_VERSION;
use crate::error::ConfigError;

/// The documented v1 API root.
pub const DEFAULT_BASE_URL: &str = "https://sellium.site/api/v1";

/// Request timeout of the default HTTP transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the default `User-Agent` value, identifying this library.
#[must_use]
pub fn default_user_agent() -> String {
    format!("sellium-rust/{SDK_VERSION}")
}

/// Configuration for a Sellium API client.
///
/// Holds the API root, credentials, user agent and the underlying
/// `reqwest::Client`. The configuration is immutable once built.
///
/// # Thread Safety
///
/// `SelliumConfig` is `Clone`, `Send`, and `Sync`. Cloning shares the
/// underlying connection pool of the transport.
#[derive(Clone, Debug)]
pub struct SelliumConfig {
    base_url: BaseUrl,
    api_key: ApiKey,
    store_id: StoreId,
    user_agent: String,
    http: reqwest::Client,
}

impl SelliumConfig {
    /// Creates a configuration from credentials and an ordered list of overrides.
    ///
    /// Defaults are applied first, then each option in order. When two
    /// options target the same field, the later one wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if no transport was supplied and
    /// the default one cannot be created.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sellium_api::{BaseUrl, ClientOption, SelliumConfig};
    ///
    /// let config = SelliumConfig::new(
    ///     "sk_live_123",
    ///     "store_42",
    ///     [
    ///         ClientOption::BaseUrl(BaseUrl::new("https://staging.sellium.site/api/v1").unwrap()),
    ///         ClientOption::BaseUrl(BaseUrl::new("http://localhost:3000/api/v1").unwrap()),
    ///     ],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(config.base_url().as_ref(), "http://localhost:3000/api/v1");
    /// ```
    pub fn new(
        api_key: impl Into<ApiKey>,
        store_id: impl Into<StoreId>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .api_key(api_key)
            .store_id(store_id)
            .options(options)
            .build()
    }

    /// Creates a new builder for constructing a `SelliumConfig`.
    #[must_use]
    pub fn builder() -> SelliumConfigBuilder {
        SelliumConfigBuilder::new()
    }

    /// Returns the API root every request path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the store identifier.
    #[must_use]
    pub const fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the underlying HTTP transport.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

// Verify SelliumConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SelliumConfig>();
};

/// A single configuration override.
///
/// Each variant replaces exactly one field of the configuration. Options
/// are applied after the defaults, in the order given.
#[derive(Clone, Debug)]
pub enum ClientOption {
    /// Replaces the API root.
    BaseUrl(BaseUrl),
    /// Replaces the HTTP transport. The default timeout no longer applies;
    /// configure one on the supplied client if needed.
    Transport(reqwest::Client),
    /// Replaces the `User-Agent` header value.
    UserAgent(String),
}

impl ClientOption {
    /// Applies this override to a builder, returning the updated builder.
    #[must_use]
    pub fn apply(self, builder: SelliumConfigBuilder) -> SelliumConfigBuilder {
        match self {
            Self::BaseUrl(url) => builder.base_url(url),
            Self::Transport(client) => builder.http_client(client),
            Self::UserAgent(agent) => builder.user_agent(agent),
        }
    }
}

/// Builder for constructing [`SelliumConfig`] instances.
///
/// Required fields are `api_key` and `store_id`.
///
/// # Defaults
///
/// - `base_url`: [`DEFAULT_BASE_URL`]
/// - `user_agent`: [`default_user_agent`]
/// - `http_client`: a rustls `reqwest::Client` with a [`DEFAULT_TIMEOUT`] timeout
#[derive(Debug, Default)]
pub struct SelliumConfigBuilder {
    api_key: Option<ApiKey>,
    store_id: Option<StoreId>,
    base_url: Option<BaseUrl>,
    user_agent: Option<String>,
    http: Option<reqwest::Client>,
}

impl SelliumConfigBuilder {
    /// Creates a new builder with no fields set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<ApiKey>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the store identifier (required).
    #[must_use]
    pub fn store_id(mut self, id: impl Into<StoreId>) -> Self {
        self.store_id = Some(id.into());
        self
    }

    /// Sets the API root.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Sets the underlying HTTP transport.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Applies a single override.
    #[must_use]
    pub fn option(self, option: ClientOption) -> Self {
        option.apply(self)
    }

    /// Applies overrides in order.
    #[must_use]
    pub fn options(self, options: impl IntoIterator<Item = ClientOption>) -> Self {
        options.into_iter().fold(self, |builder, option| option.apply(builder))
    }

    /// Builds the [`SelliumConfig`], filling in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or `store_id`
    /// are not set, [`ConfigError::InvalidBaseUrl`] if the default root is
    /// rejected, or [`ConfigError::HttpClient`] if the default transport cannot
    /// be created.
    pub fn build(self) -> Result<SelliumConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let store_id = self
            .store_id
            .ok_or(ConfigError::MissingRequiredField { field: "store_id" })?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => BaseUrl::new(DEFAULT_BASE_URL)?,
        };

        let http = match self.http {
            Some(client) => client,
            None => default_http_client()?,
        };

        Ok(SelliumConfig {
            base_url,
            api_key,
            store_id,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            http,
        })
    }
}

fn default_http_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(|e| ConfigError::HttpClient {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_api_key() {
        let result = SelliumConfigBuilder::new().store_id("store").build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "api_key" })
        ));
    }

    #[test]
    fn test_builder_requires_store_id() {
        let result = SelliumConfigBuilder::new().api_key("key").build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "store_id" })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = SelliumConfig::builder()
            .api_key("key")
            .store_id("store")
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.user_agent(), default_user_agent());
        assert!(config.user_agent().starts_with("sellium-rust/"));
        assert_eq!(config.api_key().as_ref(), "key");
        assert_eq!(config.store_id().as_ref(), "store");
    }

    #[test]
    fn test_later_options_override_earlier_ones() {
        let config = SelliumConfig::new(
            "key",
            "store",
            [
                ClientOption::UserAgent("first/1.0".to_string()),
                ClientOption::BaseUrl(BaseUrl::new("http://localhost:1").unwrap()),
                ClientOption::UserAgent("second/2.0".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(config.user_agent(), "second/2.0");
        assert_eq!(config.base_url().as_ref(), "http://localhost:1");
    }

    #[test]
    fn test_option_only_touches_its_own_field() {
        let config = SelliumConfig::new(
            "key",
            "store",
            [ClientOption::UserAgent("agent/1.0".to_string())],
        )
        .unwrap();

        assert_eq!(config.base_url().as_ref(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key().as_ref(), "key");
    }

    #[test]
    fn test_custom_transport_is_accepted() {
        let transport = reqwest::Client::new();
        let config = SelliumConfig::new("key", "store", [ClientOption::Transport(transport)]);
        assert!(config.is_ok());
    }

    #[test]
    fn test_config_is_clone_and_debug_without_leaking_key() {
        let config = SelliumConfig::builder()
            .api_key("very-secret")
            .store_id("store")
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.api_key(), config.api_key());

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("SelliumConfig"));
        assert!(!debug_str.contains("very-secret"));
    }
}
