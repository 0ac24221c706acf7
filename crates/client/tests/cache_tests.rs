//! Result caching tests against a live mock server.
//!
//! Upstream request counts are asserted through wiremock's `expect`, which
//! is verified when the mock server drops.

mod common;

use common::*;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};

#[tokio::test]
async fn test_repeated_search_hits_upstream_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graylog_body(2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.cache_timeout = Duration::from_secs(60);
    let client = client_with(config);

    let first = client.search("source:sw1*", None, None, None).await;
    let second = client.search("source:sw1*", None, None, None).await;

    assert!(first.error.is_none());
    assert!(second.error.is_none());
    assert_eq!(second.messages.len(), 2);
    assert_eq!(second.query, first.query);
}

#[tokio::test]
async fn test_different_limit_is_a_separate_cache_entry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graylog_body(1)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.cache_timeout = Duration::from_secs(60);
    let client = client_with(config);

    client.search("source:sw1*", None, Some(10), None).await;
    client.search("source:sw1*", None, Some(20), None).await;
}

#[tokio::test]
async fn test_cache_expiry_triggers_refetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graylog_body(1)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.cache_timeout = Duration::from_secs(1);
    let client = client_with(config);

    client.search("source:sw1*", None, None, None).await;
    // Within TTL: served from cache.
    client.search("source:sw1*", None, None, None).await;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    client.search("source:sw1*", None, None, None).await;
}

#[tokio::test]
async fn test_zero_ttl_disables_caching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graylog_body(1)))
        .expect(2)
        .mount(&mock_server)
        .await;

    // test_config sets cache_timeout to zero.
    let client = test_client(&mock_server.uri());
    client.search("source:sw1*", None, None, None).await;
    client.search("source:sw1*", None, None, None).await;
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let mock_server = MockServer::start().await;

    // First request fails, second succeeds; both must reach upstream.
    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graylog_body(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.cache_timeout = Duration::from_secs(60);
    let client = client_with(config);

    let failed = client.search("source:sw1*", None, None, None).await;
    assert!(failed.error.is_some());

    let recovered = client.search("source:sw1*", None, None, None).await;
    assert!(recovered.error.is_none());
    assert_eq!(recovered.messages.len(), 1);
}

#[tokio::test]
async fn test_cached_result_is_not_annotated_across_callers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/search/universal/relative"))
        .and(query_param("query", "source:sw1*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graylog_body(1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = test_config(&mock_server.uri());
    config.cache_timeout = Duration::from_secs(60);
    config.fallback_to_ip = false;
    let client = client_with(config);

    let device = graylog_client::Device {
        name: "sw1".to_string(),
        virtual_chassis: None,
        primary_ip4: None,
    };
    let annotated = client.get_logs_for_device(&device).await;
    assert_eq!(annotated.object_name.as_deref(), Some("sw1"));

    // A raw search for the same key is a cache hit without the annotation.
    let raw = client.search("source:sw1*", None, None, None).await;
    assert_eq!(raw.object_name, None);
}
