//! Common test utilities for integration tests.
//!
//! Shared helpers for building clients against a wiremock server and for
//! fabricating Graylog response bodies.

use std::time::Duration;

#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use graylog_client::GraylogClient;
use graylog_config::{ConfigLoader, GraylogConfig};

/// Config pointing at a mock server, with a token and caching disabled.
/// Tests exercising the cache override `cache_timeout` themselves.
pub fn test_config(base_url: &str) -> GraylogConfig {
    ConfigLoader::new()
        .with_graylog_url(base_url.to_string())
        .with_api_token("test-token".to_string())
        .with_timeout(Duration::from_secs(5))
        .with_cache_timeout(Duration::ZERO)
        .build()
        .expect("test config must validate")
}

/// Client over `test_config`.
pub fn test_client(base_url: &str) -> GraylogClient {
    GraylogClient::new(test_config(base_url)).expect("client must build")
}

/// Client over an explicit config.
pub fn client_with(config: GraylogConfig) -> GraylogClient {
    GraylogClient::new(config).expect("client must build")
}

/// A Graylog relative-search body with `count` messages.
pub fn graylog_body(count: usize) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "message": {
                    "source": "sw1",
                    "message": format!("Test event {}", i + 1),
                    "timestamp": "2025-01-24T12:00:05.000Z"
                },
                "index": "graylog_0"
            })
        })
        .collect();
    serde_json::json!({
        "messages": messages,
        "total_results": count,
        "time": 12.0
    })
}
