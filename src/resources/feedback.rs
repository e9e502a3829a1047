//! Feedback resource implementation.
//!
//! Feedback is left by customers after an order. A store can reply to it
//! and choose whether it is shown publicly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{ApiResponse, HttpClient, HttpError, QueryParams};

use super::{is_zero, list_query, resource_path, Pagination, Patch};

const FEEDBACK_PATH: &str = "/feedback";

/// The product embedded in a feedback order summary.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FeedbackProduct {
    /// The identifier of the product.
    pub id: String,
    /// The name of the product.
    pub name: String,
}

/// The order a piece of feedback belongs to. Only sent by
/// [`FeedbackService::get`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FeedbackOrder {
    /// The identifier of the order.
    pub id: String,
    /// The order total, in cents.
    pub amount_in_cents: i64,
    /// The order state.
    pub status: String,
    /// When the order was placed.
    pub created_at: Option<DateTime<Utc>>,
    /// The product that was bought.
    pub product: FeedbackProduct,
}

/// A review left by a customer after an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Feedback {
    /// The unique identifier of the feedback entry.
    /// Read-only field.
    pub id: String,
    /// The email address of the reviewer.
    pub customer_email: String,
    /// The name of the reviewer, if given.
    pub customer_name: Option<String>,
    /// The review text.
    pub message: String,
    /// The store's public reply, if any.
    pub response: Option<String>,
    /// The rating, from 1 to 5.
    pub rating: i64,
    /// Whether the entry is shown on the storefront.
    pub is_visible: bool,
    /// When the store replied.
    pub responded_at: Option<DateTime<Utc>>,
    /// When the feedback was left.
    /// Read-only field.
    pub created_at: Option<DateTime<Utc>>,
    /// When the feedback was last updated.
    /// Read-only field.
    pub updated_at: Option<DateTime<Utc>>,
    /// The order the feedback is about.
    pub order_id: Option<String>,
    /// A summary of that order, when included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<FeedbackOrder>,
}

/// Filters for [`FeedbackService::list`].
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct ListFeedbackParams {
    /// The page to fetch. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub page: u32,
    /// Entries per page. `0` lets the API choose.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: u32,
    /// Star rating, 1 to 5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Only return entries with (`true`) or without (`false`) a reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_response: Option<bool>,
    /// Only return visible (`true`) or hidden (`false`) entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Only return entries from this email address.
    pub email: String,
}

/// Payload of [`FeedbackService::list`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ListFeedbackResponse {
    /// The entries on this page.
    pub feedback: Vec<Feedback>,
    /// Where this page sits in the full list.
    pub pagination: Pagination,
}

/// Body of [`FeedbackService::update`].
///
/// Setting `response` to [`Patch::Null`] removes the store's reply.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct UpdateFeedbackRequest {
    /// The public reply. `Null` removes it.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub response: Patch<String>,
    /// Show or hide the entry on the storefront.
    #[serde(skip_serializing_if = "Patch::is_unset")]
    pub is_visible: Patch<bool>,
}

/// Feedback operations.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackService<'a> {
    client: &'a HttpClient,
}

impl<'a> FeedbackService<'a> {
    pub(crate) const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// Lists feedback, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn list(
        &self,
        params: &ListFeedbackParams,
    ) -> Result<ApiResponse<ListFeedbackResponse>, HttpError> {
        let query = list_query(params)?;
        self.client.get(FEEDBACK_PATH, query).await
    }

    /// Fetches a single piece of feedback with its order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn get(&self, feedback_id: &str) -> Result<ApiResponse<Feedback>, HttpError> {
        self.client
            .get(&resource_path(FEEDBACK_PATH, feedback_id), QueryParams::new())
            .await
    }

    /// Replies to feedback or changes its visibility.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn update(
        &self,
        feedback_id: &str,
        request: &UpdateFeedbackRequest,
    ) -> Result<ApiResponse<Feedback>, HttpError> {
        self.client
            .patch(&resource_path(FEEDBACK_PATH, feedback_id), request)
            .await
    }
}
