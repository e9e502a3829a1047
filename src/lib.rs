//! # Sellium API Rust SDK
//!
//! A typed, async client for the Sellium e-commerce REST API.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`SelliumConfig`] and [`SelliumConfigBuilder`]
//! - Ordered configuration overrides via [`ClientOption`]
//! - A transport core, [`HttpClient`], that unwraps the API's
//!   `{success, data, error}` envelope and reports failures as [`HttpError`]
//! - Rate limit information on every response via [`ResponseMeta`]
//! - Typed wrappers for the store, products, coupons, orders, customers,
//!   feedback, tickets, blacklist and groups resources
//!
//! ## Quick Start
//!
//! ```rust
//! use sellium_api::{SelliumClient, SelliumConfig};
//!
//! // Defaults: https://sellium.site/api/v1, 30 second timeout
//! let client = SelliumClient::new("sk_live_123", "store_42", []).unwrap();
//!
//! // Or through the builder
//! let config = SelliumConfig::builder()
//!     .api_key("sk_live_123")
//!     .store_id("store_42")
//!     .user_agent("inventory-sync/1.0")
//!     .build()
//!     .unwrap();
//! let client = SelliumClient::from_config(config);
//! # let _ = client;
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! use sellium_api::resources::orders::{ListOrdersParams, OrderStatus};
//!
//! let params = ListOrdersParams {
//!     status: Some(OrderStatus::Pending),
//!     ..Default::default()
//! };
//!
//! let response = client.orders().list(&params).await?;
//! for order in &response.orders {
//!     println!("{} {}", order.id, order.customer_email);
//! }
//!
//! if let Some(limit) = response.rate_limit() {
//!     println!("{} requests left, window resets in {}s", limit.remaining, limit.reset_seconds);
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use sellium_api::HttpError;
//!
//! match client.products().get("prod_404").await {
//!     Ok(response) => println!("{}", response.product.name),
//!     Err(HttpError::Api { error, .. }) if error.status == 404 => println!("no such product"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`](https://docs.rs/tracing) events and installs no
//! subscriber. Requests and responses are logged at `debug`, API errors at
//! `warn`. Credentials are never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **No hidden retries**: Every call is exactly one HTTP round trip
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Cancel a call by dropping its future

mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use client::SelliumClient;
pub use config::{ApiKey, BaseUrl, ClientOption, SelliumConfig, SelliumConfigBuilder, StoreId};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, ApiResponse, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    InvalidHttpRequestError, QueryParams, RateLimit, ResponseMeta,
};

// Re-export shared resource types
pub use resources::{Pagination, Patch};
