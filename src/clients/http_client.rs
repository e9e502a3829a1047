//! HTTP client for Sellium API communication.
//!
//! This module provides [`HttpClient`], the transport core every resource
//! operation goes through. It builds and sends the request, captures the
//! response metadata, and classifies the body:
//!
//! 1. An empty body, or a bare `null` with a 2xx status, is a success with
//!    no payload.
//! 2. An envelope with `success: true` yields its `data` member.
//! 3. An envelope with `success: false` and an `error` object yields an
//!    [`ApiError`] with the reported code and message.
//! 4. Any other body with a non-2xx status yields an [`ApiError`] with code
//!    `HTTP_ERROR`.
//! 5. Any other 2xx body is decoded as-is.
//!
//! The order of these checks decides which responses count as errors, so it
//! must not change.

use std::collections::HashMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_request::{HttpMethod, HttpRequest, QueryParams};
use crate::clients::http_response::{ApiResponse, ResponseMeta};
use crate::config::SelliumConfig;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Header carrying the store identifier.
pub const STORE_ID_HEADER: &str = "X-Store-ID";

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client for making requests to the Sellium API.
///
/// Every request carries the `X-API-Key`, `X-Store-ID`, `Accept` and
/// `User-Agent` headers; requests with a body also carry
/// `Content-Type: application/json`.
///
/// # Cancellation
///
/// Calls are plain futures. Dropping one (for example through
/// `tokio::time::timeout` or `tokio::select!`) cancels the in-flight request.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync` and cheap to clone. Calls share nothing
/// mutable, so one client can serve many concurrent requests.
///
/// # Example
///
/// ```rust,ignore
/// use sellium_api::{HttpClient, SelliumConfig};
/// use sellium_api::clients::{HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(SelliumConfig::new("key", "store", [])?);
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/store").build()?;
/// let response = client.request::<serde_json::Value>(request).await?;
/// println!("{}", *response);
/// ```
#[derive(Clone)]
pub struct HttpClient {
    config: SelliumConfig,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// How a response body was classified.
#[derive(Debug)]
enum Outcome {
    /// The body was empty.
    Empty,
    /// A successful envelope; holds its `data` member (`Null` if absent).
    Data(Value),
    /// The API reported a failure or the status was not 2xx.
    Failed(ApiError),
    /// A 2xx body that is not an envelope.
    Raw,
}

impl HttpClient {
    /// Creates a new HTTP client from a configuration.
    #[must_use]
    pub fn new(config: SelliumConfig) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert(
            API_KEY_HEADER.to_string(),
            config.api_key().as_ref().to_string(),
        );
        default_headers.insert(
            STORE_ID_HEADER.to_string(),
            config.store_id().as_ref().to_string(),
        );
        default_headers.insert("Accept".to_string(), JSON_CONTENT_TYPE.to_string());
        default_headers.insert("User-Agent".to_string(), config.user_agent().to_string());

        Self {
            config,
            default_headers,
        }
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub const fn config(&self) -> &SelliumConfig {
        &self.config
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Builds the full URL for a request.
    ///
    /// The query string is only appended when at least one parameter is set.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let url = self.config.base_url().join(&request.path);
        if request.query.is_empty() {
            url
        } else {
            format!("{url}?{}", request.query.encode())
        }
    }

    /// Sends a request and decodes the payload into `T`.
    ///
    /// An empty body, a bare `null`, or a successful envelope without `data`
    /// leaves the payload at `T::default()`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::InvalidRequest`] / [`HttpError::Serialize`] if the
    ///   request cannot be built (nothing is sent)
    /// - [`HttpError::Network`] if no response was received
    /// - [`HttpError::Body`] if the body could not be read
    /// - [`HttpError::Api`] if the API reported an error or the status was not 2xx
    /// - [`HttpError::Decode`] if a successful body does not match `T`
    pub async fn request<T>(&self, request: HttpRequest) -> Result<ApiResponse<T>, HttpError>
    where
        T: DeserializeOwned + Default,
    {
        let (meta, raw) = self.dispatch(&request).await?;

        let data = match self.outcome(&request, &meta, &raw) {
            Outcome::Empty | Outcome::Data(Value::Null) => T::default(),
            Outcome::Data(value) => match serde_json::from_value(value) {
                Ok(data) => data,
                Err(source) => return Err(decode_error(source, meta)),
            },
            Outcome::Raw => match serde_json::from_slice(&raw) {
                Ok(data) => data,
                Err(source) => return Err(decode_error(source, meta)),
            },
            Outcome::Failed(error) => {
                return Err(HttpError::Api {
                    error,
                    meta: Box::new(meta),
                })
            }
        };

        Ok(ApiResponse::new(data, meta))
    }

    /// Sends a request whose response payload is not needed.
    ///
    /// The body is still classified, so API errors and non-2xx statuses are
    /// reported exactly as in [`request`](Self::request).
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request), except that no
    /// [`HttpError::Decode`] is ever returned.
    pub async fn send(&self, request: HttpRequest) -> Result<ResponseMeta, HttpError> {
        let (meta, raw) = self.dispatch(&request).await?;

        match self.outcome(&request, &meta, &raw) {
            Outcome::Failed(error) => Err(HttpError::Api {
                error,
                meta: Box::new(meta),
            }),
            Outcome::Empty | Outcome::Data(_) | Outcome::Raw => Ok(meta),
        }
    }

    /// Sends a GET request to the specified path.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn get<T>(&self, path: &str, query: QueryParams) -> Result<ApiResponse<T>, HttpError>
    where
        T: DeserializeOwned + Default,
    {
        self.make_request(HttpMethod::Get, path, None, query).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialize`] if `body` cannot be encoded, otherwise
    /// the same as [`request`](Self::request).
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, HttpError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.make_request(HttpMethod::Post, path, Some(body), QueryParams::new())
            .await
    }

    /// Sends a PATCH request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Serialize`] if `body` cannot be encoded, otherwise
    /// the same as [`request`](Self::request).
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<ApiResponse<T>, HttpError>
    where
        T: DeserializeOwned + Default,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.make_request(HttpMethod::Patch, path, Some(body), QueryParams::new())
            .await
    }

    /// Sends a DELETE request to the specified path.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn delete<T>(&self, path: &str) -> Result<ApiResponse<T>, HttpError>
    where
        T: DeserializeOwned + Default,
    {
        self.make_request(HttpMethod::Delete, path, None, QueryParams::new())
            .await
    }

    async fn make_request<T>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: QueryParams,
    ) -> Result<ApiResponse<T>, HttpError>
    where
        T: DeserializeOwned + Default,
    {
        let mut builder = HttpRequest::builder(method, path).query(query);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        let request = builder.build()?;
        self.request(request).await
    }

    /// Sends the request and reads the full body.
    ///
    /// Metadata is captured before the body is read, so it survives a body
    /// read failure.
    async fn dispatch(&self, request: &HttpRequest) -> Result<(ResponseMeta, Vec<u8>), HttpError> {
        request.verify()?;

        let url = self.url_for(request);

        let mut req_builder = self
            .config
            .http()
            .request(request.http_method.as_reqwest(), url.as_str());

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = &request.body {
            req_builder = req_builder
                .header("Content-Type", JSON_CONTENT_TYPE)
                .body(serde_json::to_vec(body)?);
        }

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            "Sending request to Sellium API"
        );

        let res = req_builder.send().await?;

        let meta = ResponseMeta::new(
            res.status().as_u16(),
            Self::parse_response_headers(res.headers()),
        );

        tracing::debug!(
            method = %request.http_method,
            path = %request.path,
            status = meta.status,
            "Received response from Sellium API"
        );

        match res.bytes().await {
            Ok(bytes) => Ok((meta, bytes.to_vec())),
            Err(source) => Err(HttpError::Body {
                source,
                meta: Box::new(meta),
            }),
        }
    }

    /// Classifies a body and logs failures.
    fn outcome(&self, request: &HttpRequest, meta: &ResponseMeta, raw: &[u8]) -> Outcome {
        let outcome = classify(meta.status, raw);

        match &outcome {
            Outcome::Failed(error) => {
                tracing::warn!(
                    path = %request.path,
                    status = error.status,
                    code = %error.code,
                    "Sellium API request failed: {}",
                    error.message
                );
            }
            Outcome::Raw => {
                tracing::debug!(
                    path = %request.path,
                    base_url = %self.config.base_url(),
                    "Response is not enveloped, decoding body as-is"
                );
            }
            Outcome::Empty | Outcome::Data(_) => {}
        }

        outcome
    }

    /// Parses response headers into a `HashMap` keyed by lower-cased name.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", self.config.base_url())
            .field("store_id", self.config.store_id())
            .field("user_agent", &self.config.user_agent())
            .finish_non_exhaustive()
    }
}

fn decode_error(source: serde_json::Error, meta: ResponseMeta) -> HttpError {
    HttpError::Decode {
        source,
        meta: Box::new(meta),
    }
}

/// Parses a body as an envelope. Anything that is not a JSON object, or an
/// object whose members have the wrong types, is not an envelope.
fn parse_envelope(body: Option<Value>) -> Option<Envelope> {
    match body {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn classify(status: u16, raw: &[u8]) -> Outcome {
    if raw.is_empty() {
        return Outcome::Empty;
    }

    let body = serde_json::from_slice::<Value>(raw).ok();
    let is_success = (200..300).contains(&status);

    // A bare `null` carries no payload, like an empty body
    if is_success && matches!(body, Some(Value::Null)) {
        return Outcome::Data(Value::Null);
    }

    if let Some(envelope) = parse_envelope(body) {
        if envelope.success.unwrap_or(false) {
            return Outcome::Data(envelope.data.unwrap_or(Value::Null));
        }

        if let Some(error) = envelope.error {
            return Outcome::Failed(ApiError {
                status,
                code: error.code.unwrap_or_default(),
                message: error.message.unwrap_or_default(),
                raw_body: raw.to_vec(),
            });
        }
    }

    if !is_success {
        return Outcome::Failed(ApiError::http_error(status, raw.to_vec()));
    }

    Outcome::Raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseUrl, ClientOption};

    fn create_test_client() -> HttpClient {
        let config = SelliumConfig::new(
            "test-api-key",
            "test-store",
            [ClientOption::BaseUrl(
                BaseUrl::new("https://sellium.test/api/v1").unwrap(),
            )],
        )
        .unwrap();
        HttpClient::new(config)
    }

    #[test]
    fn test_default_headers_carry_credentials() {
        let client = create_test_client();
        let headers = client.default_headers();

        assert_eq!(headers.get("X-API-Key"), Some(&"test-api-key".to_string()));
        assert_eq!(headers.get("X-Store-ID"), Some(&"test-store".to_string()));
        assert_eq!(headers.get("Accept"), Some(&"application/json".to_string()));
        assert!(headers.get("User-Agent").unwrap().starts_with("sellium-rust/"));
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_debug_does_not_leak_api_key() {
        let client = create_test_client();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("HttpClient"));
        assert!(!debug_str.contains("test-api-key"));
    }

    #[test]
    fn test_url_without_query_has_no_question_mark() {
        let client = create_test_client();
        let request = HttpRequest::builder(HttpMethod::Get, "/products")
            .build()
            .unwrap();

        assert_eq!(client.url_for(&request), "https://sellium.test/api/v1/products");
    }

    #[test]
    fn test_url_with_query_is_encoded() {
        let client = create_test_client();
        let request = HttpRequest::builder(HttpMethod::Get, "/orders")
            .query_param("customer_email", "jo doe@example.com")
            .query_param("page", "2")
            .build()
            .unwrap();

        assert_eq!(
            client.url_for(&request),
            "https://sellium.test/api/v1/orders?customer_email=jo%20doe%40example.com&page=2"
        );
    }

    #[test]
    fn test_classify_empty_body() {
        assert!(matches!(classify(200, b""), Outcome::Empty));
        assert!(matches!(classify(500, b""), Outcome::Empty));
    }

    #[test]
    fn test_classify_successful_envelope_yields_data() {
        let outcome = classify(200, br#"{"success":true,"data":{"x":1}}"#);
        assert!(matches!(outcome, Outcome::Data(ref v) if v["x"] == 1));

        let outcome = classify(200, br#"{"success":true}"#);
        assert!(matches!(outcome, Outcome::Data(Value::Null)));
    }

    #[test]
    fn test_classify_error_envelope() {
        let raw = br#"{"success":false,"error":{"code":"NOT_FOUND","message":"missing"}}"#;
        match classify(404, raw) {
            Outcome::Failed(error) => {
                assert_eq!(error.status, 404);
                assert_eq!(error.code, "NOT_FOUND");
                assert_eq!(error.message, "missing");
                assert_eq!(error.raw_body, raw.to_vec());
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_error_envelope_wins_over_2xx_status() {
        let raw = br#"{"success":false,"error":{"code":"LIMIT","message":"too many"}}"#;
        assert!(matches!(
            classify(200, raw),
            Outcome::Failed(ApiError { status: 200, .. })
        ));
    }

    #[test]
    fn test_classify_error_envelope_without_code() {
        let raw = br#"{"success":false,"error":{"message":"nope"}}"#;
        match classify(400, raw) {
            Outcome::Failed(error) => {
                assert_eq!(error.code, "");
                assert_eq!(error.to_string(), "sellium API error (400): nope");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_non_json_non_2xx_is_http_error() {
        match classify(500, b"plain text") {
            Outcome::Failed(error) => {
                assert_eq!(error.status, 500);
                assert_eq!(error.code, "HTTP_ERROR");
                assert_eq!(error.message, "request failed");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_failed_envelope_without_error_falls_back_to_status() {
        assert!(matches!(
            classify(403, br#"{"success":false}"#),
            Outcome::Failed(ApiError { status: 403, .. })
        ));
        assert!(matches!(classify(200, br#"{"success":false}"#), Outcome::Raw));
    }

    #[test]
    fn test_classify_bare_json_on_2xx_is_raw() {
        assert!(matches!(classify(200, br#"{"foo":"bar"}"#), Outcome::Raw));
        assert!(matches!(classify(200, br#"[1,2,3]"#), Outcome::Raw));
        assert!(matches!(classify(204, b"\"plain text\""), Outcome::Raw));
    }

    #[test]
    fn test_classify_null_body() {
        assert!(matches!(classify(200, b"null"), Outcome::Data(Value::Null)));
        assert!(matches!(classify(204, b" null "), Outcome::Data(Value::Null)));
        assert!(matches!(
            classify(500, b"null"),
            Outcome::Failed(ApiError { status: 500, ref code, .. }) if code == "HTTP_ERROR"
        ));
    }

    #[test]
    fn test_response_headers_keep_non_ascii_values() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "X-Store-Name",
            reqwest::header::HeaderValue::from_bytes("Caf\u{e9} Keys".as_bytes()).unwrap(),
        );
        headers.append("Set-Cookie", reqwest::header::HeaderValue::from_static("a=1"));
        headers.append("Set-Cookie", reqwest::header::HeaderValue::from_static("b=2"));

        let parsed = HttpClient::parse_response_headers(&headers);

        assert_eq!(parsed["x-store-name"], vec!["Caf\u{e9} Keys".to_string()]);
        assert_eq!(parsed["set-cookie"], vec!["a=1".to_string(), "b=2".to_string()]);
    }

    #[test]
    fn test_classify_arrays_are_never_envelopes() {
        // A positional array must not be mistaken for {success: true}.
        assert!(matches!(
            classify(400, br#"[true, {"x": 1}]"#),
            Outcome::Failed(ApiError { status: 400, .. })
        ));
    }

    #[test]
    fn test_classify_mistyped_envelope_is_not_an_envelope() {
        assert!(matches!(classify(200, br#"{"success":"yes"}"#), Outcome::Raw));
        assert!(matches!(
            classify(422, br#"{"success":false,"error":"bad"}"#),
            Outcome::Failed(ApiError { ref code, .. }) if code == "HTTP_ERROR"
        ));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpClient>();
    }
}
