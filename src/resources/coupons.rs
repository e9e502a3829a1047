//! Coupon resource implementation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, DeletedResponse, Pagination, Patch};

const COUPONS_PATH: &str = "/coupons";

/// How a coupon's `value` is applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum CouponType {
    /// `value` is a percentage between 1 and 100.
    #[default]
    Percentage,
    /// `value` is an amount in cents.
    Fixed,
}

impl CouponType {
    /// Returns the wire name of the coupon type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for CouponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usage figures of a coupon.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CouponAnalytics {
    /// How many orders used the coupon.
    pub total_uses: i64,
    /// Revenue from those orders, in cents.
    pub total_revenue_cents: i64,
    /// Uses left before `maximum_uses` is reached.
    pub remaining_uses: i64,
    /// Whether `expires_at` has passed.
    pub is_expired: bool,
}

/// A discount code.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Coupon {
    /// The unique identifier of the coupon.
    /// Read-only field.
    pub id: String,
    /// The code customers enter at checkout.
    pub code: String,
    /// Whether `value` is a percentage or a fixed amount (see [`CouponType`]).
    #[serde(rename = "type")]
    pub coupon_type: String,
    /// The discount: a percentage, or an amount in cents.
    pub value: i64,
    /// The smallest order total, in cents, the coupon applies to.
    pub minimum_purchase: Option<i64>,
    /// How many times the coupon can be used in total.
    pub maximum_uses: Option<i64>,
    /// How many times the coupon has been used.
    /// Read-only field.
    pub uses_count: i64,
    /// Whether the coupon can be redeemed.
    pub is_active: bool,
    /// When the coupon stops being valid.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the coupon was created.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
    /// When the coupon was last updated.
    /// Read-only field.
    pub updated_at: Option<DateTime<Utc>>,
    /// Usage figures, returned by [`CouponsService::get`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<CouponAnalytics>,
}

/// Filters for [`CouponsService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListCouponsParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Coupons per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Only return active (`true`) or inactive (`false`) coupons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    /// Only return coupons matching this code.
    pub code: String,
}

/// Payload of [`CouponsService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListCouponsResponse {
    /// The coupons on this page.
    pub coupons: Vec<Coupon>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Body of [`CouponsService::create`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CreateCouponRequest {
    /// The code customers enter at checkout.
    pub code: String,
    /// Whether `value` is a percentage or a fixed amount.
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    /// Percentage (1-100) or cents, depending on `coupon_type`.
    pub value: i64,
    /// The smallest order total, in cents, the coupon applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_purchase: Option<i64>,
    /// How many times the coupon can be used in total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_uses: Option<i64>,
    /// Whether the coupon can be redeemed right away.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// When the coupon stops being valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Body of [`CouponsService::update`]. Only set fields are sent.
///
/// Clearing `maximum_uses` or `expires_at` with [`Patch::Null`] removes the
/// limit.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct UpdateCouponRequest {
    /// The code customers enter at checkout.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub code: Patch<String>,
    /// Whether `value` is a percentage or a fixed amount.
    #[serde(rename = "type", skip_serializing_if = "Patch::is_unset")]
    pub coupon_type: Patch<CouponType>,
    /// The discount: a percentage, or an amount in cents.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub value: Patch<i64>,
    /// The smallest order total, in cents, the coupon applies to.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub minimum_purchase: Patch<i64>,
    /// How many times the coupon can be used in total.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub maximum_uses: Patch<i64>,
    /// Whether the coupon can be redeemed.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub is_active: Patch<bool>,
    /// When the coupon stops being valid.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub expires_at: Patch<DateTime<Utc>>,
}

/// Coupon operations.
#[derive(Debug, Clone, Copy)]
pub struct CouponsService<'a> {
    client: &'a HttpClient,
}

impl<'a> CouponsService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists coupons, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListCouponsParams,
    ) -> Result<ApiResponse<ListCouponsResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(COUPONS_PATH, query).await
    }

    /// Fetches a single coupon, including its usage analytics.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, coupon_id: &str) -> Result<ApiResponse<Coupon>, HttpError> {
        self.client
            .get(&resource_path(COUPONS_PATH, coupon_id), QueryParams::new())
            .await
    }

    /// Creates a coupon.
    ///
    /// The API does not document the shape of the returned payload, so it is
    /// handed back as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn create(
        &self,
        request: &CreateCouponRequest,
    ) -> Result<ApiResponse<Value>, HttpError> {
        self.client.post(COUPONS_PATH, request).await
    }

    /// Updates the fields set in `request`. The payload is raw JSON, as with
    /// [`create`](Self::create).
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update(
        &self,
        coupon_id: &str,
        request: &UpdateCouponRequest,
    ) -> Result<ApiResponse<Value>, HttpError> {
        self.client
            .patch(&resource_path(COUPONS_PATH, coupon_id), request)
            .await
    }

    /// Deletes a coupon.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn delete(&self, coupon_id: &str) -> Result<ApiResponse<DeletedResponse>, HttpError> {
        self.client
            .delete(&resource_path(COUPONS_PATH, coupon_id))
            .await
    }
}
