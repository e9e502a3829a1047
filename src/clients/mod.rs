//! HTTP client types for Sellium API communication.
//!
//! This module provides the transport layer every resource operation goes
//! through. It sends authenticated JSON requests, unwraps the
//! `{success, data, error}` response envelope, and reports failures as
//! structured errors.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`QueryParams`]: Ordered, percent-encoded query parameters
//! - [`ApiResponse`]: A decoded payload plus its [`ResponseMeta`]
//! - [`RateLimit`]: Rate limit information from response headers
//! - [`HttpError`] and [`ApiError`]: What can go wrong
//!
//! # Example
//!
//! ```rust,ignore
//! use sellium_api::{HttpClient, SelliumConfig};
//! use sellium_api::clients::{HttpMethod, HttpRequest};
//!
//! let client = HttpClient::new(SelliumConfig::new("key", "store", [])?);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/products")
//!     .query_param("page", "2")
//!     .build()?;
//!
//! let response = client.request::<serde_json::Value>(request).await?;
//! if let Some(limit) = response.rate_limit() {
//!     println!("{} of {} requests left", limit.remaining, limit.limit);
//! }
//! ```
//!
//! # Retry Behavior
//!
//! Nothing is retried. A rate-limited call surfaces as an [`HttpError::Api`]
//! with status 429 and the rate limit in its metadata.

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError, HTTP_ERROR_CODE, HTTP_ERROR_MESSAGE};
pub use http_client::{HttpClient, API_KEY_HEADER, SDK_VERSION, STORE_ID_HEADER};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, QueryParams};
pub use http_response::{
    ApiResponse, RateLimit, ResponseMeta, RATE_LIMIT_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
    RATE_LIMIT_RESET_HEADER,
};
