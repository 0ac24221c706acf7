//! Error normalization tests.
//!
//! Every failure path must produce an envelope with an empty message list
//! and the matching `SearchError` variant, never a panic.

mod common;

use common::*;
use graylog_client::SearchError;
use graylog_config::ConfigLoader;
use std::time::Duration;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_http_401_maps_to_authentication_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.search("source:sw1*", None, None, None).await;

    assert_eq!(result.error, Some(SearchError::AuthenticationFailed));
    assert!(result.messages.is_empty());
}

#[tokio::test]
async fn test_http_403_maps_to_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.search("source:sw1*", None, None, None).await;

    assert_eq!(result.error, Some(SearchError::PermissionDenied));
}

#[tokio::test]
async fn test_other_status_maps_to_upstream_http_with_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.search("source:sw1*", None, None, None).await;

    match result.error {
        Some(SearchError::UpstreamHttp { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected UpstreamHttp, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_maps_to_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.search("source:sw1*", None, None, None).await;

    assert!(matches!(result.error, Some(SearchError::Unexpected(_))));
    assert!(result.messages.is_empty());
}

#[tokio::test]
async fn test_unreachable_host_maps_to_connection_failed() {
    // Nothing listens on this port.
    let config = ConfigLoader::new()
        .with_graylog_url("http://127.0.0.1:9".to_string())
        .with_api_token("test-token".to_string())
        .with_timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let client = client_with(config);

    let result = client.search("source:sw1*", None, None, None).await;

    assert!(matches!(
        result.error,
        Some(SearchError::ConnectionFailed(_))
    ));
}

#[tokio::test]
async fn test_slow_upstream_maps_to_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(graylog_body(1))
                .set_delay(Duration::from_secs(8)),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let result = client.search("source:sw1*", None, None, None).await;

    assert_eq!(result.error, Some(SearchError::Timeout(Duration::from_secs(5))));
    assert!(result.messages.is_empty());
}
