//! Error types for calls made through the transport core.
//!
//! # Error Handling
//!
//! Every call either yields a decoded payload or one of these errors:
//!
//! - [`HttpError::Api`]: the API reported a failure, or answered with a
//!   non-2xx status. Carries an [`ApiError`] and the response metadata.
//! - [`HttpError::Decode`]: a 2xx body that does not match the expected shape.
//! - [`HttpError::Body`]: headers arrived but the body could not be read.
//! - [`HttpError::Network`]: no response was received.
//! - [`HttpError::Serialize`], [`HttpError::InvalidRequest`]: the request was
//!   rejected before being sent.
//!
//! Nothing is retried. Callers own any retry decisions.
//!
//! # Example
//!
//! ```rust,ignore
//! use sellium_api::HttpError;
//!
//! match client.products().get("prod_1").await {
//!     Ok(response) => println!("Product: {}", response.product.name),
//!     Err(HttpError::Api { error, meta }) => {
//!         println!("API error {} ({}): {}", error.status, error.code, error.message);
//!         if let Some(limit) = meta.rate_limit {
//!             println!("Requests left: {}", limit.remaining);
//!         }
//!     }
//!     Err(e) => println!("Request failed: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::http_response::ResponseMeta;

/// Code used when a non-2xx response carries no usable error envelope.
pub const HTTP_ERROR_CODE: &str = "HTTP_ERROR";

/// Message used when a non-2xx response carries no usable error envelope.
pub const HTTP_ERROR_MESSAGE: &str = "request failed";

/// A failure reported by the API, or a non-2xx response.
///
/// The display form always includes the status and message, and includes
/// the code only when it is non-empty.
///
/// # Example
///
/// ```rust
/// use sellium_api::ApiError;
///
/// let error = ApiError {
///     status: 404,
///     code: "NOT_FOUND".to_string(),
///     message: "Product not found".to_string(),
///     raw_body: Vec::new(),
/// };
/// assert_eq!(error.to_string(), "sellium API error (404) NOT_FOUND: Product not found");
///
/// let error = ApiError { code: String::new(), ..error };
/// assert_eq!(error.to_string(), "sellium API error (404): Product not found");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("sellium API error ({}){}: {}", .status, code_segment(.code), .message)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The API error code (e.g., `NOT_FOUND`), possibly empty.
    pub code: String,
    /// The human-readable message.
    pub message: String,
    /// The raw response body, for diagnostics.
    pub raw_body: Vec<u8>,
}

impl ApiError {
    /// Creates the error used for non-2xx responses without an error envelope.
    #[must_use]
    pub fn http_error(status: u16, raw_body: Vec<u8>) -> Self {
        Self {
            status,
            code: HTTP_ERROR_CODE.to_string(),
            message: HTTP_ERROR_MESSAGE.to_string(),
            raw_body,
        }
    }

    /// Returns the raw body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn raw_body_text(&self) -> String {
        String::from_utf8_lossy(&self.raw_body).into_owned()
    }
}

fn code_segment(code: &str) -> String {
    if code.is_empty() {
        String::new()
    } else {
        format!(" {code}")
    }
}

/// Error returned when a request fails validation before being sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path is empty.
    #[error("Request path cannot be empty.")]
    EmptyPath,

    /// The request path does not start with `/`.
    #[error("Request path '{path}' must start with '/'.")]
    MissingLeadingSlash {
        /// The path that was provided.
        path: String,
    },

    /// The request path is a full URL instead of a path below the base URL.
    #[error("Request path '{path}' must be relative to the base URL.")]
    AbsolutePath {
        /// The path that was provided.
        path: String,
    },
}

/// Unified error type for calls made through the transport core.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The API reported a failure, or the status was outside 2xx.
    #[error("{error}")]
    Api {
        /// The structured error.
        error: ApiError,
        /// Metadata of the response.
        meta: Box<ResponseMeta>,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("failed to decode response: {source}")]
    Decode {
        /// The underlying parse failure.
        source: serde_json::Error,
        /// Metadata of the response.
        meta: Box<ResponseMeta>,
    },

    /// The response body could not be read after the headers arrived.
    #[error("failed to read response body: {source}")]
    Body {
        /// The underlying transport failure.
        source: reqwest::Error,
        /// Metadata of the response.
        meta: Box<ResponseMeta>,
    },

    /// Network or connection error before any response was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl HttpError {
    /// Returns the response metadata, if a response was received.
    #[must_use]
    pub fn meta(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Api { meta, .. } | Self::Decode { meta, .. } | Self::Body { meta, .. } => {
                Some(&**meta)
            }
            Self::Network(_) | Self::Serialize(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Returns the structured API error, if this is one.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.meta().map(|meta| meta.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn meta(status: u16) -> Box<ResponseMeta> {
        Box::new(ResponseMeta::new(status, HashMap::new()))
    }

    #[test]
    fn test_api_error_display_includes_code_when_present() {
        let error = ApiError {
            status: 422,
            code: "VALIDATION_ERROR".to_string(),
            message: "name is required".to_string(),
            raw_body: b"{}".to_vec(),
        };
        assert_eq!(
            error.to_string(),
            "sellium API error (422) VALIDATION_ERROR: name is required"
        );
    }

    #[test]
    fn test_api_error_display_omits_empty_code() {
        let error = ApiError {
            status: 500,
            code: String::new(),
            message: "boom".to_string(),
            raw_body: Vec::new(),
        };
        assert_eq!(error.to_string(), "sellium API error (500): boom");
    }

    #[test]
    fn test_http_error_fallback_values() {
        let error = ApiError::http_error(502, b"<html>Bad Gateway</html>".to_vec());
        assert_eq!(error.code, "HTTP_ERROR");
        assert_eq!(error.message, "request failed");
        assert_eq!(error.raw_body_text(), "<html>Bad Gateway</html>");
        assert_eq!(
            error.to_string(),
            "sellium API error (502) HTTP_ERROR: request failed"
        );
    }

    #[test]
    fn test_http_error_api_variant_exposes_meta_and_error() {
        let error = HttpError::Api {
            error: ApiError::http_error(503, Vec::new()),
            meta: meta(503),
        };

        assert_eq!(error.status(), Some(503));
        assert_eq!(error.api_error().map(|e| e.code.as_str()), Some("HTTP_ERROR"));
        assert!(error.to_string().contains("(503)"));
    }

    #[test]
    fn test_decode_error_has_fixed_prefix() {
        let source = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let error = HttpError::Decode {
            source,
            meta: meta(200),
        };

        assert!(error.to_string().starts_with("failed to decode response: "));
        assert!(error.api_error().is_none());
        assert_eq!(error.status(), Some(200));
    }

    #[test]
    fn test_errors_without_response_have_no_meta() {
        let error: HttpError = InvalidHttpRequestError::EmptyPath.into();
        assert!(error.meta().is_none());
        assert!(error.status().is_none());

        let source = serde_json::from_str::<u32>("x").unwrap_err();
        let error: HttpError = source.into();
        assert!(matches!(error, HttpError::Serialize(_)));
        assert!(error.meta().is_none());
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let api: &dyn std::error::Error = &ApiError::http_error(500, Vec::new());
        let _ = api;

        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::EmptyPath;
        let _ = invalid;
    }
}
