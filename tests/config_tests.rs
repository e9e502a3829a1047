//! Integration tests for client configuration.
//!
//! Covers base URL validation, credential masking, and the way a
//! finished configuration reaches the wire.

use std::time::Duration;

use serde_json::json;
use sellium_api::config::DEFAULT_BASE_URL;
use sellium_api::{BaseUrl, ClientOption, ConfigError, SelliumClient, SelliumConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_invalid_base_url_is_rejected() {
    let result = BaseUrl::new("sellium.site/api/v1");
    assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
}

#[test]
fn test_config_debug_masks_api_key() {
    let config = SelliumConfig::new("sk_live_very_secret", "store", []).unwrap();
    let debug = format!("{config:?}");

    assert!(!debug.contains("sk_live_very_secret"));
    assert!(debug.contains("store"));
}

#[test]
fn test_client_is_cheap_to_clone() {
    let client = SelliumClient::new("key", "store", []).unwrap();
    let clone = client.clone();

    assert_eq!(clone.config().store_id(), client.config().store_id());
    assert_eq!(clone.config().base_url().as_ref(), DEFAULT_BASE_URL);
}

// ============================================================================
// Configuration On The Wire
// ============================================================================

#[tokio::test]
async fn test_supplied_transport_is_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/store"))
        .and(header("X-API-Key", "key"))
        .and(header("X-Store-ID", "store_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"store": {"id": "store_7", "name": "Night Market"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transport = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let client = SelliumClient::new(
        "key",
        "store_7",
        [
            ClientOption::Transport(transport),
            ClientOption::BaseUrl(BaseUrl::new(server.uri()).unwrap()),
        ],
    )
    .unwrap();

    let response = client.store().get().await.unwrap();
    assert_eq!(response.store.name, "Night Market");
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_ignored() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/store"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = BaseUrl::new(format!("{}/api/v1/", server.uri())).unwrap();
    let client = SelliumClient::new("key", "store", [ClientOption::BaseUrl(base_url)]).unwrap();

    client.store().get().await.unwrap();
}
