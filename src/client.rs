//! The top-level Sellium client.

use crate::clients::HttpClient;
use crate::config::{ApiKey, ClientOption, SelliumConfig, StoreId};
use crate::error::ConfigError;
use crate::resources::{
    BlacklistService, CouponsService, CustomersService, FeedbackService, GroupsService,
    OrdersService, ProductsService, StoreService, TicketsService,
};

/// Entry point to the Sellium API.
///
/// Owns one [`HttpClient`] and hands out lightweight service handles that
/// borrow it. Services are created on demand and cost nothing to obtain.
///
/// # Example
///
/// ```rust,ignore
/// use sellium_api::{ClientOption, SelliumClient};
///
/// let client = SelliumClient::new(
///     std::env::var("SELLIUM_API_KEY")?,
///     std::env::var("SELLIUM_STORE_ID")?,
///     [ClientOption::UserAgent("inventory-sync/1.0".to_string())],
/// )?;
///
/// let store = client.store().get().await?;
/// println!("{} has {} products", store.store.name, store.stats.product_count);
/// ```
#[derive(Clone, Debug)]
pub struct SelliumClient {
    http: HttpClient,
}

// Verify SelliumClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SelliumClient>();
};

impl SelliumClient {
    /// Creates a client from credentials and an ordered list of overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the default transport cannot be created.
    pub fn new(
        api_key: impl Into<ApiKey>,
        store_id: impl Into<StoreId>,
        options: impl IntoIterator<Item = ClientOption>,
    ) -> Result<Self, ConfigError> {
        let config = SelliumConfig::new(api_key, store_id, options)?;
        Ok(Self::from_config(config))
    }

    /// Creates a client from a prepared configuration.
    #[must_use]
    pub fn from_config(config: SelliumConfig) -> Self {
        tracing::debug!(
            base_url = %config.base_url(),
            store_id = %config.store_id(),
            "Creating Sellium client"
        );
        Self {
            http: HttpClient::new(config),
        }
    }

    /// Returns the transport core, for endpoints without a typed wrapper.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub const fn config(&self) -> &SelliumConfig {
        self.http.config()
    }

    #[must_use]
    pub const fn store(&self) -> StoreService<'_> {
        StoreService::new(&self.http)
    }

    #[must_use]
    pub const fn products(&self) -> ProductsService<'_> {
        ProductsService::new(&self.http)
    }

    #[must_use]
    pub const fn coupons(&self) -> CouponsService<'_> {
        CouponsService::new(&self.http)
    }

    #[must_use]
    pub const fn orders(&self) -> OrdersService<'_> {
        OrdersService::new(&self.http)
    }

    #[must_use]
    pub const fn customers(&self) -> CustomersService<'_> {
        CustomersService::new(&self.http)
    }

    #[must_use]
    pub const fn feedback(&self) -> FeedbackService<'_> {
        FeedbackService::new(&self.http)
    }

    #[must_use]
    pub const fn tickets(&self) -> TicketsService<'_> {
        TicketsService::new(&self.http)
    }

    #[must_use]
    pub const fn blacklist(&self) -> BlacklistService<'_> {
        BlacklistService::new(&self.http)
    }

    #[must_use]
    pub const fn groups(&self) -> GroupsService<'_> {
        GroupsService::new(&self.http)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseUrl;

    #[test]
    fn test_new_applies_options() {
        let client = SelliumClient::new(
            "key",
            "store_1",
            [ClientOption::BaseUrl(
                BaseUrl::new("http://localhost:9999/api/v1").unwrap(),
            )],
        )
        .unwrap();

        assert_eq!(client.config().base_url().as_ref(), "http://localhost:9999/api/v1");
        assert_eq!(client.config().store_id().as_ref(), "store_1");
    }

    #[test]
    fn test_services_share_the_same_core() {
        let client = SelliumClient::new("key", "store", []).unwrap();
        let core: *const HttpClient = client.http();

        let products = client.products();
        let orders = client.orders();
        let _ = (products, orders);

        assert!(std::ptr::eq(core, client.http()));
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let client = SelliumClient::new("secret-key-123", "store", []).unwrap();
        assert!(!format!("{client:?}").contains("secret-key-123"));
    }
}
