//! Order resource implementation.
//!
//! Orders can be created on behalf of a customer and moved through their
//! lifecycle. Marking an order `completed` triggers delivery; the update
//! payload reports what was delivered, or why delivery failed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, DeletedResponse, Pagination, Patch};

const ORDERS_PATH: &str = "/orders";

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Canceled,
    Refunded,
}

impl OrderStatus {
    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment provider used for an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Crypto,
    Cashapp,
}

impl PaymentMethod {
    /// Returns the wire name of the payment method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paypal => "paypal",
            Self::Crypto => "crypto",
            Self::Cashapp => "cashapp",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The product an order was placed for.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OrderProductMini {
    /// The identifier of the product.
    pub id: String,
    /// The name of the product.
    pub name: String,
    /// The unit price at the time of the order, in cents.
    pub price_in_cents: i64,
    /// How the product is delivered.
    pub delivery_type: Option<String>,
    /// The URL of the product image.
    pub image_url: Option<String>,
    /// The product name as recorded on the order.
    pub product_name: Option<String>,
}

/// An order placed in the store.
///
/// Visitor fields (`country`, `browser`, ...) come from the checkout session
/// and are absent for orders created through the API.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Order {
    /// The unique identifier of the order.
    /// Read-only field.
    pub id: String,
    /// The email address of the buyer.
    pub customer_email: String,
    /// The name of the buyer, if given.
    pub customer_name: Option<String>,

    /// The order state (see [`OrderStatus`]).
    pub status: String,
    /// The order total, in cents.
    pub amount_in_cents: i64,
    /// The number of units bought.
    pub quantity: i64,

    /// The payment method used (see [`PaymentMethod`]).
    pub payment_method: Option<String>,
    /// Whether the payment provider confirmed the payment.
    pub payment_verified: bool,
    /// Whether the product has been delivered.
    pub delivered: bool,

    /// The payment page of an unpaid order.
    pub checkout_url: Option<String>,
    /// The payment provider's transaction identifier.
    pub transaction_id: Option<String>,
    /// What was delivered to the customer.
    pub delivery_content: Option<String>,

    /// The currency the customer paid in.
    pub payment_currency: Option<String>,
    /// The amount paid in `payment_currency`, as text.
    pub payment_amount: Option<String>,
    /// The buyer's country, from the checkout session.
    pub country: Option<String>,
    /// The buyer's city, from the checkout session.
    pub city: Option<String>,
    /// The buyer's region, from the checkout session.
    pub region: Option<String>,
    /// The device used at checkout.
    pub device_type: Option<String>,
    /// The browser used at checkout.
    pub browser: Option<String>,
    /// The operating system used at checkout.
    pub os: Option<String>,
    /// The page the buyer came from.
    pub referrer: Option<String>,
    /// The affiliate code applied to the order.
    pub affiliate_code: Option<String>,

    /// Answers to the product's custom fields.
    pub custom_fields: Option<Value>,

    /// When the order was placed.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,

    /// The product that was bought.
    pub product: OrderProductMini,
}

/// Filters for [`OrdersService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListOrdersParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Orders per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return orders in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    /// Only return orders of this product.
    pub product_id: String,
    /// Only return orders placed with this email address.
    pub customer_email: String,
}

/// Payload of [`OrdersService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ListOrdersResponse {
    /// The orders on this page.
    pub orders: Vec<Order>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Payload of [`OrdersService::get`] and [`OrdersService::create`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OrderResponse {
    /// The order.
    pub order: Order,
}

/// Payload of [`OrdersService::update`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct UpdateOrderResponse {
    /// The order after the update.
    pub order: Order,
    /// What was delivered, when the update completed the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Value>,
    /// A non-fatal problem the API ran into, such as low stock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Why delivery failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_error: Option<String>,
}

/// Body of [`OrdersService::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CreateOrderRequest {
    /// The product to order.
    pub product_id: String,
    /// The email address of the buyer.
    pub customer_email: String,
    /// The number of units.
    pub quantity: i64,
    /// The name of the buyer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    /// The payment method to record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// Answers to the product's custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Value>,
    /// An affiliate code to credit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliate_code: Option<String>,
}

/// Body of [`OrdersService::update`]. Only set fields are sent.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct UpdateOrderRequest {
    /// The new state. Moving to `completed` triggers delivery.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub status: Patch<OrderStatus>,
    /// The name of the buyer.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub customer_name: Patch<String>,
    /// The payment provider's transaction identifier.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub transaction_id: Patch<String>,
    /// Answers to the product's custom fields.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub custom_fields: Patch<Value>,
}

/// Order operations.
#[derive(Debug, Clone, Copy)]
pub struct OrdersService<'a> {
    client: &'a HttpClient,
}

impl<'a> OrdersService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists orders, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListOrdersParams,
    ) -> Result<ApiResponse<ListOrdersResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(ORDERS_PATH, query).await
    }

    /// Fetches a single order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, order_id: &str) -> Result<ApiResponse<OrderResponse>, HttpError> {
        self.client
            .get(&resource_path(ORDERS_PATH, order_id), QueryParams::new())
            .await
    }

    /// Creates a pending order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, HttpError> {
        self.client.post(ORDERS_PATH, request).await
    }

    /// Updates the fields set in `request`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails. A delivery failure after
    /// a successful status change is not an error; it is reported in
    /// [`UpdateOrderResponse::delivery_error`].
    pub async fn update(
        &self,
        order_id: &str,
        request: &UpdateOrderRequest,
    ) -> Result<ApiResponse<UpdateOrderResponse>, HttpError> {
        self.client
            .patch(&resource_path(ORDERS_PATH, order_id), request)
            .await
    }

    /// Deletes an order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete(&self, order_id: &str) -> Result<ApiResponse<DeletedResponse>, HttpError> {
        self.client
            .delete(&resource_path(ORDERS_PATH, order_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_params_serialize_status_as_wire_name() {
        let params = ListOrdersParams {
            status: Some(OrderStatus::Completed),
            customer_email: "buyer@example.com".to_string(),
            limit: 25,
            ..Default::default()
        };
        let query = QueryParams::from_serialize(&params).unwrap();

        assert_eq!(query.get("status"), Some("completed"));
        assert_eq!(query.get("customer_email"), Some("buyer@example.com"));
        assert_eq!(query.get("limit"), Some("25"));
        assert!(query.get("product_id").is_none());
        assert!(query.get("page").is_none());
    }

    #[test]
    fn test_create_request_body() {
        let request = CreateOrderRequest {
            product_id: "prod_1".to_string(),
            customer_email: "buyer@example.com".to_string(),
            quantity: 2,
            payment_method: Some(PaymentMethod::Crypto),
            custom_fields: Some(json!({"discord": "buyer#0001"})),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "product_id": "prod_1",
                "customer_email": "buyer@example.com",
                "quantity": 2,
                "payment_method": "crypto",
                "custom_fields": {"discord": "buyer#0001"}
            })
        );
    }

    #[test]
    fn test_update_response_with_delivery_error() {
        let payload: UpdateOrderResponse = serde_json::from_value(json!({
            "order": {
                "id": "ord_1",
                "customer_email": "buyer@example.com",
                "status": "completed",
                "amount_in_cents": 999,
                "quantity": 1,
                "product": {"id": "prod_1", "name": "Steam Key", "price_in_cents": 999}
            },
            "delivery_error": "no serials left"
        }))
        .unwrap();

        assert_eq!(payload.order.status, OrderStatus::Completed.as_str());
        assert_eq!(payload.order.product.name, "Steam Key");
        assert!(payload.delivery.is_none());
        assert_eq!(payload.delivery_error.as_deref(), Some("no serials left"));
    }

    #[test]
    fn test_update_request_only_sends_status() {
        let request = UpdateOrderRequest {
            status: OrderStatus::Refunded.into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"status": "refunded"})
        );
    }
}
