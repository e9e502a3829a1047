//! Product resource implementation.
//!
//! Products are what a store sells. Each product has a delivery type that
//! decides what the customer receives after payment.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, Pagination, Patch};

const PRODUCTS_PATH: &str = "/products";

/// How a product is delivered once an order is paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryType {
    /// A downloadable file.
    File,
    /// One serial per unit, taken from the product's serial list.
    Serials,
    /// A service message shown to the customer.
    #[default]
    Service,
    /// Content fetched from the product's dynamic webhook.
    Dynamic,
}

impl DeliveryType {
    /// Returns the wire name of the delivery type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Serials => "serials",
            Self::Service => "service",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in a Sellium store.
///
/// Delivery fields only apply to the matching [`DeliveryType`]; free-form
/// settings are kept as raw JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Product {
    /// The unique identifier of the product.
    /// Read-only field.
    pub id: String,
    /// The name of the product.
    pub name: String,
    /// The description shown on the product page.
    pub description: Option<String>,
    /// The URL of the product image.
    pub image_url: Option<String>,
    /// The unit price, in cents.
    pub price_in_cents: i64,
    /// Whether the product can be bought.
    pub is_active: bool,
    /// The number of units in stock.
    pub stock_quantity: i64,
    /// How the product is delivered (see [`DeliveryType`]).
    pub delivery_type: String,

    /// The smallest quantity allowed per order.
    pub minimum_quantity: Option<i64>,
    /// The largest quantity allowed per order.
    pub maximum_quantity: Option<i64>,
    /// Whether the product is hidden from the storefront listing but reachable by link.
    pub unlisted: bool,
    /// Whether the product is hidden from the storefront entirely.
    pub is_private: bool,
    /// Whether sales are paused.
    pub on_hold: bool,
    /// Warranty text shown to the customer.
    pub warranty: Option<String>,
    /// Terms the customer accepts at checkout.
    pub product_terms: Option<String>,

    /// The group the product belongs to, if any.
    pub group_id: Option<String>,

    /// The file delivered for `file` products.
    pub file_url: Option<String>,
    /// The remaining serials of `serials` products.
    pub serials: Vec<String>,
    /// The message delivered for `service` products.
    pub service_message: Option<String>,
    /// Extra text shown with every delivery.
    pub delivery_text: Option<String>,
    /// The endpoint queried for content of `dynamic` products.
    pub dynamic_webhook_url: Option<String>,
    /// Where the customer is sent after checkout.
    pub redirect_url: Option<String>,
    /// A YouTube video shown on the product page.
    pub youtube_url: Option<String>,

    /// Whether checkout asks for the customer's Discord account.
    pub discord_enabled: bool,
    /// Whether the Discord account may be skipped at checkout.
    pub discord_optional: bool,

    /// Whether license keys are issued for this product.
    pub enable_license_system: bool,
    /// The number of devices a license may be activated on.
    pub license_max_devices: Option<i64>,
    /// Days until an issued license expires; `None` means never.
    pub license_expires_days: Option<i64>,

    /// Extra fields collected at checkout, as sent by the API.
    pub custom_fields: Option<Value>,
    /// Quantity-based discount tiers, as sent by the API.
    pub volume_discounts: Option<Value>,
    /// The payment methods accepted for this product, as sent by the API.
    pub payment_methods: Option<Value>,
    /// Endpoints notified about orders of this product, as sent by the API.
    pub webhook_urls: Option<Value>,

    /// Stock available for sale, after reservations.
    /// Read-only field.
    pub available_stock: Option<i64>,

    /// When the product was created.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
    /// When the product was last updated.
    /// Read-only field.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for [`ProductsService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListProductsParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Products per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return active (`true`) or inactive (`false`) products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Only return products of this group. Empty means any group.
    pub group_id: String,
}

/// Payload of [`ProductsService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ListProductsResponse {
    /// The products on this page.
    pub products: Vec<Product>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Payload of the single-product endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProductResponse {
    /// The product.
    pub product: Product,
}

/// Payload of [`ProductsService::delete`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeleteProductResponse {
    /// Whether the product was deleted.
    pub deleted: bool,
    /// The identifier of the deleted product.
    pub product_id: String,
    /// The name the product had.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// Body of [`ProductsService::create`].
///
/// `name`, `price_in_cents` and `delivery_type` are required; everything
/// else is only sent when set.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CreateProductRequest {
    /// The name of the product.
    pub name: String,
    /// The unit price, in cents.
    pub price_in_cents: i64,
    /// How the product is delivered.
    pub delivery_type: DeliveryType,

    /// The description shown on the product page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The URL of the product image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Whether the product can be bought right away.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// The initial number of units in stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    /// The smallest quantity allowed per order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_quantity: Option<i64>,
    /// The largest quantity allowed per order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_quantity: Option<i64>,
    /// Hide the product from the listing but keep it reachable by link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlisted: Option<bool>,
    /// Hide the product from the storefront entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    /// Create the product with sales paused.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_hold: Option<bool>,
    /// Warranty text shown to the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    /// Terms the customer accepts at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_terms: Option<String>,
    /// The group to put the product in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Serials handed out one per unit, for `serials` products.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub serials: Vec<String>,
    /// The file delivered for `file` products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// The message delivered for `service` products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_message: Option<String>,
    /// Extra text shown with every delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_text: Option<String>,
    /// The endpoint queried for content of `dynamic` products.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dynamic_webhook_url: Option<String>,
    /// Where the customer is sent after checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// A YouTube video shown on the product page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,

    /// Ask for the customer's Discord account at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_enabled: Option<bool>,
    /// Let the customer skip the Discord account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_optional: Option<bool>,

    /// Issue license keys for this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_license_system: Option<bool>,
    /// The number of devices a license may be activated on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_max_devices: Option<i64>,
    /// Days until an issued license expires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_expires_days: Option<i64>,

    /// Extra fields collected at checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Value>,
    /// Quantity-based discount tiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_discounts: Option<Value>,
    /// The payment methods accepted for this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Value>,
    /// Endpoints notified about orders of this product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_urls: Option<Value>,
}

/// Body of [`ProductsService::update`]. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdateProductRequest {
    /// The name of the product.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    /// The description shown on the product page.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub description: Patch<String>,
    /// The URL of the product image.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub image_url: Patch<String>,
    /// The unit price, in cents.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub price_in_cents: Patch<i64>,
    /// How the product is delivered.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub delivery_type: Patch<DeliveryType>,
    /// Whether the product can be bought.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub is_active: Patch<bool>,
    /// The number of units in stock.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub stock_quantity: Patch<i64>,
    /// The smallest quantity allowed per order.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub minimum_quantity: Patch<i64>,
    /// The largest quantity allowed per order.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub maximum_quantity: Patch<i64>,
    /// Hide the product from the listing but keep it reachable by link.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub unlisted: Patch<bool>,
    /// Hide the product from the storefront entirely.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub is_private: Patch<bool>,
    /// Pause or resume sales.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub on_hold: Patch<bool>,
    /// Warranty text shown to the customer.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub warranty: Patch<String>,
    /// Terms the customer accepts at checkout.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub product_terms: Patch<String>,
    /// The group to put the product in.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub group_id: Patch<String>,

    /// Replaces the remaining serials of `serials` products.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub serials: Patch<Vec<String>>,
    /// The file delivered for `file` products.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub file_url: Patch<String>,
    /// The message delivered for `service` products.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub service_message: Patch<String>,
    /// Extra text shown with every delivery.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub delivery_text: Patch<String>,
    /// The endpoint queried for content of `dynamic` products.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub dynamic_webhook_url: Patch<String>,
    /// Where the customer is sent after checkout.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub redirect_url: Patch<String>,
    /// A YouTube video shown on the product page.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub youtube_url: Patch<String>,

    /// Ask for the customer's Discord account at checkout.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub discord_enabled: Patch<bool>,
    /// Let the customer skip the Discord account.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub discord_optional: Patch<bool>,
    /// Issue license keys for this product.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub enable_license_system: Patch<bool>,
    /// The number of devices a license may be activated on.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub license_max_devices: Patch<i64>,
    /// Days until an issued license expires.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub license_expires_days: Patch<i64>,

    /// Extra fields collected at checkout.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub custom_fields: Patch<Value>,
    /// Quantity-based discount tiers.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub volume_discounts: Patch<Value>,
    /// The payment methods accepted for this product.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub payment_methods: Patch<Value>,
    /// Endpoints notified about orders of this product.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub webhook_urls: Patch<Value>,
}

/// Product operations.
#[derive(Debug, Clone, Copy)]
pub struct ProductsService<'a> {
    client: &'a HttpClient,
}

impl<'a> ProductsService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists products, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListProductsParams,
    ) -> Result<ApiResponse<ListProductsResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(PRODUCTS_PATH, query).await
    }

    /// Fetches a single product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, product_id: &str) -> Result<ApiResponse<ProductResponse>, HttpError> {
        self.client
            .get(&resource_path(PRODUCTS_PATH, product_id), QueryParams::new())
            .await
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create(
        &self,
        request: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, HttpError> {
        self.client.post(PRODUCTS_PATH, request).await
    }

    /// Updates the fields set in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update(
        &self,
        product_id: &str,
        request: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, HttpError> {
        self.client
            .patch(&resource_path(PRODUCTS_PATH, product_id), request)
            .await
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<DeleteProductResponse>, HttpError> {
        self.client
            .delete(&resource_path(PRODUCTS_PATH, product_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_params_only_send_set_filters() {
        let query = QueryParams::from_serialize(&ListProductsParams::default()).unwrap();
        assert!(query.is_empty());

        let params = ListProductsParams {
            page: 2,
            limit: 0,
            active: Some(false),
            group_id: "grp_1".to_string(),
        };
        let query = QueryParams::from_serialize(&params).unwrap();

        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("active"), Some("false"));
        assert_eq!(query.get("group_id"), Some("grp_1"));
        assert!(query.get("limit").is_none());
    }

    #[test]
    fn test_create_request_serializes_required_fields_only_by_default() {
        let request = CreateProductRequest {
            name: "Steam Key".to_string(),
            price_in_cents: 999,
            delivery_type: DeliveryType::Serials,
            serials: vec!["AAAA-BBBB".to_string()],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "name": "Steam Key",
                "price_in_cents": 999,
                "delivery_type": "serials",
                "serials": ["AAAA-BBBB"]
            })
        );
    }

    #[test]
    fn test_update_request_distinguishes_null_from_unset() {
        let request = UpdateProductRequest {
            price_in_cents: Patch::Value(1299),
            group_id: Patch::Null,
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"price_in_cents": 1299, "group_id": null})
        );
    }

    #[test]
    fn test_product_tolerates_sparse_payload() {
        let product: Product = serde_json::from_value(json!({
            "id": "prod_1",
            "name": "Wallpaper pack",
            "price_in_cents": 500,
            "delivery_type": "file",
            "license_expires_days": null,
            "custom_fields": [{"name": "discord", "required": true}]
        }))
        .unwrap();

        assert_eq!(product.id, "prod_1");
        assert_eq!(product.delivery_type, DeliveryType::File.as_str());
        assert!(product.serials.is_empty());
        assert!(product.license_expires_days.is_none());
        assert_eq!(product.custom_fields.unwrap()[0]["name"], "discord");
    }

    #[test]
    fn test_delivery_type_wire_names() {
        for (kind, name) in [
            (DeliveryType::File, "file"),
            (DeliveryType::Serials, "serials"),
            (DeliveryType::Service, "service"),
            (DeliveryType::Dynamic, "dynamic"),
        ] {
            assert_eq!(kind.to_string(), name);
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(name));
        }
    }
}
