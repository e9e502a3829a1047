//! Response types for the Sellium API SDK.
//!
//! This module provides [`ResponseMeta`], the per-call metadata returned with
//! every completed request, the [`RateLimit`] parsed from response headers,
//! and [`ApiResponse<T>`], which pairs a decoded payload with its metadata.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// Header carrying the request budget of the current window.
pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
/// Header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
/// Header carrying the seconds until the window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information parsed from the `X-RateLimit-*` response headers.
///
/// # Example
///
/// ```rust
/// use sellium_api::clients::RateLimit;
///
/// let limit = RateLimit::from_values(Some("100"), Some("42"), Some("3600")).unwrap();
/// assert_eq!(limit.limit, 100);
/// assert_eq!(limit.remaining, 42);
/// assert_eq!(limit.reset_seconds, 3600);
///
/// // Nothing usable: no rate limit at all rather than a zeroed one
/// assert!(RateLimit::from_values(None, Some("abc"), None).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimit {
    /// The number of requests allowed in the current window.
    pub limit: i64,
    /// The number of requests left in the current window.
    pub remaining: i64,
    /// Seconds until the window resets.
    pub reset_seconds: i64,
}

impl RateLimit {
    /// Builds a rate limit from the three raw header values.
    ///
    /// Missing or unparseable values count as zero. When all three are zero
    /// the result is `None`, so "no data" is not reported as "nothing left".
    /// A response that really sends `0/0/0` is indistinguishable from one
    /// without the headers.
    #[must_use]
    pub fn from_values(
        limit: Option<&str>,
        remaining: Option<&str>,
        reset: Option<&str>,
    ) -> Option<Self> {
        let parse = |value: Option<&str>| value.and_then(|v| v.parse::<i64>().ok()).unwrap_or(0);

        let limit = parse(limit);
        let remaining = parse(remaining);
        let reset_seconds = parse(reset);

        if limit == 0 && remaining == 0 && reset_seconds == 0 {
            return None;
        }

        Some(Self {
            limit,
            remaining,
            reset_seconds,
        })
    }

    /// Parses the rate limit from a lower-cased header map.
    #[must_use]
    pub fn from_headers(headers: &HashMap<String, Vec<String>>) -> Option<Self> {
        let first = |name: &str| {
            headers
                .get(name)
                .and_then(|values| values.first())
                .map(String::as_str)
        };

        Self::from_values(
            first(RATE_LIMIT_LIMIT_HEADER),
            first(RATE_LIMIT_REMAINING_HEADER),
            first(RATE_LIMIT_RESET_HEADER),
        )
    }
}

/// Metadata captured from a response before its body is read.
///
/// Returned with every call that received a response, whether it
/// succeeded or failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseMeta {
    /// The HTTP status code.
    pub status: u16,
    /// Response headers, keyed by lower-cased name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// Rate limit information, if the response carried any.
    pub rate_limit: Option<RateLimit>,
}

impl ResponseMeta {
    /// Creates metadata from a status and header map, parsing the rate limit.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, Vec<String>>) -> Self {
        let rate_limit = RateLimit::from_headers(&headers);
        Self {
            status,
            headers,
            rate_limit,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// A decoded payload together with the metadata of the response it came from.
///
/// Implements `Deref<Target = T>`, so the payload can be used directly.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use sellium_api::clients::{ApiResponse, ResponseMeta};
///
/// let response = ApiResponse::new(vec!["a", "b"], ResponseMeta::new(200, HashMap::new()));
/// assert_eq!(response.len(), 2);
/// assert_eq!(response.status(), 200);
/// assert!(response.rate_limit().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    data: T,
    meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// Creates a new response from a payload and its metadata.
    #[must_use]
    pub const fn new(data: T, meta: ResponseMeta) -> Self {
        Self { data, meta }
    }

    /// Returns a reference to the payload.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns the response metadata.
    #[must_use]
    pub const fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.meta.status
    }

    /// Returns the rate limit information, if available.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<&RateLimit> {
        self.meta.rate_limit.as_ref()
    }

    /// Consumes the response and returns the payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Consumes the response and returns payload and metadata.
    #[must_use]
    pub fn into_parts(self) -> (T, ResponseMeta) {
        (self.data, self.meta)
    }

    /// Maps the payload to a new type, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            data: f(self.data),
            meta: self.meta,
        }
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ApiResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ApiResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiResponse<String>>();
    assert_send_sync::<ResponseMeta>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<String>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for (k, v) in pairs {
            map.entry((*k).to_string()).or_default().push((*v).to_string());
        }
        map
    }

    #[test]
    fn test_rate_limit_parsed_from_headers() {
        let meta = ResponseMeta::new(
            200,
            headers(&[
                ("x-ratelimit-limit", "100"),
                ("x-ratelimit-remaining", "42"),
                ("x-ratelimit-reset", "3600"),
            ]),
        );

        assert_eq!(
            meta.rate_limit,
            Some(RateLimit {
                limit: 100,
                remaining: 42,
                reset_seconds: 3600,
            })
        );
    }

    #[test]
    fn test_rate_limit_absent_without_headers() {
        let meta = ResponseMeta::new(200, HashMap::new());
        assert!(meta.rate_limit.is_none());
    }

    #[test]
    fn test_rate_limit_all_zero_headers_reported_as_absent() {
        let meta = ResponseMeta::new(
            200,
            headers(&[
                ("x-ratelimit-limit", "0"),
                ("x-ratelimit-remaining", "0"),
                ("x-ratelimit-reset", "0"),
            ]),
        );
        assert!(meta.rate_limit.is_none());
    }

    #[test]
    fn test_rate_limit_zero_remaining_kept_when_other_values_set() {
        let limit = RateLimit::from_values(Some("60"), Some("0"), Some("12")).unwrap();
        assert_eq!(limit.remaining, 0);
        assert_eq!(limit.limit, 60);
    }

    #[test]
    fn test_rate_limit_unparseable_values_count_as_zero() {
        let limit = RateLimit::from_values(Some("ten"), Some("5"), Some(" 7")).unwrap();
        assert_eq!(limit.limit, 0);
        assert_eq!(limit.remaining, 5);
        assert_eq!(limit.reset_seconds, 0);
    }

    #[test]
    fn test_is_success_covers_2xx_only() {
        for code in 200..=299 {
            assert!(ResponseMeta::new(code, HashMap::new()).is_success());
        }
        for code in [199, 300, 404, 500] {
            assert!(!ResponseMeta::new(code, HashMap::new()).is_success());
        }
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let meta = ResponseMeta::new(200, headers(&[("x-request-id", "req-1")]));
        assert_eq!(meta.header("X-Request-Id"), Some("req-1"));
        assert_eq!(meta.header("missing"), None);
    }

    #[test]
    fn test_api_response_deref_and_parts() {
        let mut response = ApiResponse::new(vec![1, 2], ResponseMeta::new(201, HashMap::new()));
        response.push(3);
        assert_eq!(response.len(), 3);

        let (data, meta) = response.into_parts();
        assert_eq!(data, vec![1, 2, 3]);
        assert_eq!(meta.status, 201);
    }

    #[test]
    fn test_api_response_map_keeps_meta() {
        let response = ApiResponse::new(vec![1, 2, 3], ResponseMeta::new(200, HashMap::new()));
        let mapped = response.map(|v| v.len());
        assert_eq!(*mapped, 3);
        assert_eq!(mapped.status(), 200);
    }
}
