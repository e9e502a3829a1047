//! Typed wrappers around the Sellium REST resources.
//!
//! Each submodule holds the models of one resource together with a service
//! handle that borrows an [`HttpClient`]. Services build query parameters or
//! request bodies and hand them to the transport core; none of them talk to
//! the network directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use sellium_api::SelliumClient;
//! use sellium_api::resources::products::ListProductsParams;
//!
//! let client = SelliumClient::new("sk_live_123", "store_42", [])?;
//!
//! let params = ListProductsParams {
//!     active: Some(true),
//!     limit: 50,
//!     ..Default::default()
//! };
//!
//! let page = client.products().list(&params).await?;
//! for product in &page.products {
//!     println!("{} ({} cents)", product.name, product.price_in_cents);
//! }
//! if page.pagination.has_next_page() {
//!     println!("more to come");
//! }
//! ```
//!
//! # Optional values
//!
//! List params use plain values where "zero" means "not set": a `page` of
//! `0` or an empty `search` string is never sent. Filters that have a
//! meaningful zero value (`active: Some(false)`) are `Option`s.
//!
//! Update bodies use [`Patch`] so a field can be left alone, cleared with
//! `null`, or set.

pub mod blacklist;
pub mod coupons;
pub mod customers;
pub mod feedback;
pub mod groups;
pub mod orders;
pub mod products;
pub mod store;
pub mod tickets;

use serde::{Deserialize, Serialize, Serializer};

use crate::clients::{HttpError, QueryParams};

pub use blacklist::BlacklistService;
pub use coupons::CouponsService;
pub use customers::CustomersService;
pub use feedback::FeedbackService;
pub use groups::GroupsService;
pub use orders::OrdersService;
pub use products::ProductsService;
pub use store::StoreService;
pub use tickets::TicketsService;

/// Pagination block returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
    /// The current page number, starting at 1.
    pub page: i64,
    /// The number of items per page.
    pub limit: i64,
    /// The total number of items across all pages.
    pub total: i64,
    /// The total number of pages.
    pub total_pages: i64,
    /// Whether another page follows, when the API reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl Pagination {
    /// Returns `true` if another page follows this one.
    ///
    /// Uses `has_more` when the API sent it, otherwise compares the page
    /// number with `total_pages`.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.has_more.unwrap_or(self.page < self.total_pages)
    }

    /// Returns the number of the next page, if there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<i64> {
        self.has_next_page().then_some(self.page + 1)
    }
}

/// A field of an update request.
///
/// - `Unset` leaves the field untouched; it is not serialized at all (pair
///   it with `#[serde(skip_serializing_if = "Patch::is_unset")]`)
/// - `Null` sends an explicit `null`, clearing the field
/// - `Value` sends the new value
///
/// # Example
///
/// ```rust
/// use sellium_api::resources::Patch;
/// use sellium_api::resources::feedback::UpdateFeedbackRequest;
///
/// let request = UpdateFeedbackRequest {
///     response: Patch::Null,
///     is_visible: Patch::Value(true),
/// };
/// assert_eq!(
///     serde_json::to_string(&request).unwrap(),
///     r#"{"response":null,"is_visible":true}"#
/// );
///
/// let untouched = UpdateFeedbackRequest::default();
/// assert_eq!(serde_json::to_string(&untouched).unwrap(), "{}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// Leave the field as it is.
    Unset,
    /// Clear the field.
    Null,
    /// Set the field.
    Value(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field is left untouched.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the value being set, if any.
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Unset | Self::Null => None,
        }
    }

    /// Maps `None` to `Null` and `Some` to `Value`.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Unset | Self::Null => serializer.serialize_none(),
        }
    }
}

/// Payload of the delete endpoints that only confirm the deletion.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeletedResponse {
    /// Whether the resource was deleted.
    pub deleted: bool,
    /// The identifier of the deleted resource, when echoed back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Joins a collection path and a percent-encoded identifier.
pub(crate) fn resource_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

/// Turns a params struct into query parameters.
pub(crate) fn list_query<P: Serialize>(params: &P) -> Result<QueryParams, HttpError> {
    Ok(QueryParams::from_serialize(params)?)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_zero(value: &u32) -> bool {
    *value == 0
}
