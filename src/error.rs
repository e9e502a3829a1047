//! Error types for the Sellium API SDK.
//!
//! This module contains error types used while configuring the SDK and
//! constructing a client.
//!
//! # Error Handling
//!
//! Configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Errors raised while talking to the API live in
//! [`crate::clients::HttpError`].
//!
//! # Example
//!
//! ```rust
//! use sellium_api::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://sellium.site/api/v1').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The default HTTP transport could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// The underlying failure, rendered as text.
        reason: String,
    },
}
