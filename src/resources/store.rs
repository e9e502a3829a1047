//! Store resource implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

/// Links to the store's social profiles. Unset networks are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Socials {
    /// The store's X (Twitter) handle or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// The store's Instagram handle or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    /// The store's YouTube channel URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// The store's Discord invite URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    /// The store's Telegram handle or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    /// The store's TikTok handle or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
}

/// The store the API key belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Store {
    /// The unique identifier of the store.
    /// Read-only field.
    pub id: String,
    /// The display name of the store.
    pub name: String,
    /// The URL-friendly name used in the storefront address.
    pub slug: String,
    /// A short description shown on the storefront.
    pub description: Option<String>,
    /// The URL of the store logo.
    pub logo_url: Option<String>,
    /// A custom domain pointing at the storefront, if configured.
    pub custom_domain: Option<String>,
    /// The storefront accent color (e.g., `#6d28d9`).
    pub theme_color: Option<String>,
    /// The address customers contact for support.
    pub support_email: Option<String>,
    /// Whether the storefront is open.
    pub is_active: bool,
    /// The public URL of the storefront.
    /// Read-only field.
    pub url: Option<String>,
    /// Links to the store's social profiles.
    pub socials: Socials,
    /// When the store was created.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
    /// When the store was last updated.
    /// Read-only field.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lifetime sales figures of the store.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StoreStats {
    /// The number of completed sales.
    pub total_sales: i64,
    /// Lifetime revenue, in cents.
    pub total_revenue_cents: i64,
    /// The number of feedback entries received.
    pub total_reviews: i64,
    /// The average feedback rating, from 1 to 5.
    pub average_rating: f64,
    /// The number of products in the store.
    pub product_count: i64,
    /// The number of orders in the `completed` state.
    pub completed_orders: i64,
}

/// Payload of [`StoreService::get`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GetStoreResponse {
    /// The store profile.
    pub store: Store,
    /// Lifetime figures of the store.
    pub stats: StoreStats,
}

/// Access to the store the API key belongs to.
#[derive(Debug, Clone, Copy)]
pub struct StoreService<'a> {
    client: &'a HttpClient,
}

impl<'a> StoreService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Fetches the store profile and its statistics.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self) -> Result<ApiResponse<GetStoreResponse>, HttpError> {
        self.client.get("/store", QueryParams::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_store_deserializes_from_api_payload() {
        let payload: GetStoreResponse = serde_json::from_value(json!({
            "store": {
                "id": "st_1",
                "name": "Pixel Goods",
                "slug": "pixel-goods",
                "is_active": true,
                "created_at": "2024-03-01T10:00:00Z",
                "updated_at": "2024-03-02T10:00:00Z",
                "socials": {"discord": "https://discord.gg/pixel"}
            },
            "stats": {
                "total_sales": 12,
                "total_revenue_cents": 45000,
                "average_rating": 4.5
            }
        }))
        .unwrap();

        assert_eq!(payload.store.slug, "pixel-goods");
        assert!(payload.store.is_active);
        assert!(payload.store.description.is_none());
        assert_eq!(
            payload.store.socials.discord.as_deref(),
            Some("https://discord.gg/pixel")
        );
        assert_eq!(
            payload.store.created_at.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
        assert_eq!(payload.stats.total_revenue_cents, 45000);
        assert_eq!(payload.stats.product_count, 0);
    }

    #[test]
    fn test_socials_skip_unset_networks() {
        let socials = Socials {
            twitter: Some("@pixel".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&socials).unwrap(), json!({"twitter": "@pixel"}));
    }

    #[tokio::test]
    async fn test_get_calls_store_endpoint() {
        use crate::config::{BaseUrl, ClientOption, SelliumConfig};
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/store"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"store": {"id": "st_1", "name": "Pixel Goods"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = SelliumConfig::new(
            "key",
            "st_1",
            [ClientOption::BaseUrl(BaseUrl::new(server.uri()).unwrap())],
        )
        .unwrap();
        let client = HttpClient::new(config);

        let response = StoreService::new(&client).get().await.unwrap();
        assert_eq!(response.store.name, "Pixel Goods");
        assert_eq!(response.stats, StoreStats::default());
    }
}
