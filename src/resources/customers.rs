//! Customer resource implementation.
//!
//! Customers are not created directly; they are derived from orders and
//! identified by email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, Pagination};

const CUSTOMERS_PATH: &str = "/customers";

/// A customer as shown in the customer list.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerRow {
    /// The customer's email address, which identifies the customer.
    pub email: String,
    /// The most recent name the customer ordered with.
    pub name: Option<String>,
    /// The number of orders placed.
    pub total_orders: i64,
    /// The number of orders in the `completed` state.
    pub completed_orders: i64,
    /// The total spent on completed orders, in cents.
    pub total_spent_cents: i64,
    /// `total_spent_cents` formatted for display (e.g., `$39.96`).
    pub total_spent_formatted: String,
    /// When the first order was placed.
    pub first_order_at: Option<DateTime<Utc>>,
    /// When the latest order was placed.
    pub last_order_at: Option<DateTime<Utc>>,
}

/// Order counts and spend of one customer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerStats {
    /// The number of orders placed.
    pub total_orders: i64,
    /// Orders in the `completed` state.
    pub completed_orders: i64,
    /// Orders in the `pending` state.
    pub pending_orders: i64,
    /// Orders in the `canceled` state.
    pub canceled_orders: i64,
    /// Orders in the `refunded` state.
    pub refunded_orders: i64,
    /// The total spent on completed orders, in cents.
    pub total_spent_cents: i64,
    /// `total_spent_cents` formatted for display.
    pub total_spent_formatted: String,
    /// The average completed order total, in cents.
    pub average_order_value_cents: i64,
    /// `average_order_value_cents` formatted for display.
    pub average_order_value_formatted: String,
}

/// A product a customer bought, with what they spent on it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerTopProduct {
    /// The identifier of the product.
    pub product_id: String,
    /// The name of the product.
    pub product_name: String,
    /// Units bought by this customer.
    pub quantity_purchased: i64,
    /// The amount spent on this product, in cents.
    pub total_spent_cents: i64,
    /// `total_spent_cents` formatted for display.
    pub total_spent_formatted: String,
}

/// A customer as returned by [`CustomersService::get`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerDetail {
    /// The customer's email address.
    pub email: String,
    /// The most recent name the customer ordered with.
    pub name: Option<String>,
    /// Order counts and spend.
    pub stats: CustomerStats,
    /// When the first order was placed.
    pub first_order_at: Option<DateTime<Utc>>,
    /// When the latest order was placed.
    pub last_order_at: Option<DateTime<Utc>>,
    /// Every payment method the customer has paid with.
    pub payment_methods_used: Vec<String>,
    /// The products this customer spent the most on.
    pub top_products: Vec<CustomerTopProduct>,
}

/// Product reference inside a [`CustomerRecentOrder`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ProductRef {
    /// The identifier of the product.
    pub id: String,
    /// The name of the product.
    pub name: String,
}

/// An order in a customer's history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CustomerRecentOrder {
    /// The identifier of the order.
    pub id: String,
    /// The order state.
    pub status: String,
    /// The order total, in cents.
    pub amount_in_cents: i64,
    /// `amount_in_cents` formatted for display.
    pub amount_formatted: Option<String>,
    /// The number of units bought.
    pub quantity: i64,
    /// The payment method used.
    pub payment_method: Option<String>,
    /// The product that was bought.
    pub product: ProductRef,
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
}

/// Filters for [`CustomersService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListCustomersParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Customers per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return customers whose email matches.
    pub email: String,
}

/// Payload of [`CustomersService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListCustomersResponse {
    /// The customers on this page.
    pub customers: Vec<CustomerRow>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Payload of [`CustomersService::get`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GetCustomerResponse {
    /// The customer profile.
    pub customer: CustomerDetail,
    /// The customer's latest orders, newest first.
    pub recent_orders: Vec<CustomerRecentOrder>,
}

/// Customer operations.
#[derive(Debug, Clone, Copy)]
pub struct CustomersService<'a> {
    client: &'a HttpClient,
}

impl<'a> CustomersService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists customers, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListCustomersParams,
    ) -> Result<ApiResponse<ListCustomersResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(CUSTOMERS_PATH, query).await
    }

    /// Fetches a customer's profile and recent orders by email address.
    ///
    /// The address is percent-encoded into the path.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, email: &str) -> Result<ApiResponse<GetCustomerResponse>, HttpError> {
        self.client
            .get(&resource_path(CUSTOMERS_PATH, email), QueryParams::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_customer_detail_payload() {
        let payload: GetCustomerResponse = serde_json::from_value(json!({
            "customer": {
                "email": "buyer@example.com",
                "stats": {
                    "total_orders": 4,
                    "completed_orders": 3,
                    "refunded_orders": 1,
                    "total_spent_cents": 2997,
                    "total_spent_formatted": "$29.97"
                },
                "payment_methods_used": ["stripe", "crypto"],
                "top_products": [{
                    "product_id": "prod_1",
                    "product_name": "Steam Key",
                    "quantity_purchased": 3,
                    "total_spent_cents": 2997,
                    "total_spent_formatted": "$29.97"
                }]
            },
            "recent_orders": [{
                "id": "ord_9",
                "status": "completed",
                "amount_in_cents": 999,
                "quantity": 1,
                "product": {"id": "prod_1", "name": "Steam Key"},
                "created_at": "2024-05-01T08:30:00Z"
            }]
        }))
        .unwrap();

        assert_eq!(payload.customer.stats.refunded_orders, 1);
        assert_eq!(payload.customer.payment_methods_used, vec!["stripe", "crypto"]);
        assert_eq!(payload.customer.top_products[0].quantity_purchased, 3);
        assert_eq!(payload.recent_orders[0].product.name, "Steam Key");
        assert!(payload.recent_orders[0].created_at.is_some());
    }

    #[test]
    fn test_list_params_email_filter() {
        let params = ListCustomersParams {
            page: 1,
            email: "a+b@example.com".to_string(),
            ..Default::default()
        };
        let query = QueryParams::from_serialize(&params).unwrap();
        assert_eq!(query.encode(), "email=a%2Bb%40example.com&page=1");
    }
}
