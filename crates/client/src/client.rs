//! Main Graylog search client.

use std::time::Duration;

use graylog_config::GraylogConfig;
use tracing::{debug, error};

use crate::cache::{CacheKey, DEFAULT_CACHE_CAPACITY, ResponseCache};
use crate::endpoints::{self, SearchParams};
use crate::error::SearchError;
use crate::inventory::{Device, Endpoint, VirtualMachine};
use crate::models::LogSearchResult;
use crate::query;

/// Builder for creating a new GraylogClient.
pub struct GraylogClientBuilder {
    config: GraylogConfig,
    cache_capacity: u64,
    redirect_limit: usize,
}

impl GraylogClientBuilder {
    /// Create a builder from a loaded configuration.
    pub fn new(config: GraylogConfig) -> Self {
        Self {
            config,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            redirect_limit: graylog_config::constants::DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Override the cache capacity (number of entries).
    pub fn cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Normalize a base URL by removing trailing slashes, preventing double
    /// slashes when concatenating endpoint paths.
    fn normalize_base_url(url: &str) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    ///
    /// TLS certificate validation is disabled on purpose: Graylog
    /// deployments behind this plugin commonly run with self-signed
    /// certificates, and the original integration accepts them.
    pub fn build(self) -> Result<GraylogClient, SearchError> {
        let base_url = Self::normalize_base_url(&self.config.graylog_url);

        let http = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .redirect(reqwest::redirect::Policy::limited(self.redirect_limit))
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| SearchError::Unexpected(format!("failed to build HTTP client: {e}")))?;

        let cache = ResponseCache::with_capacity(self.cache_capacity, self.config.cache_timeout);

        Ok(GraylogClient {
            http,
            base_url,
            config: self.config,
            cache,
        })
    }
}

/// Client for the Graylog search API.
///
/// Owns the HTTP transport and the result cache; configuration is
/// immutable after construction. Methods take `&self`, so one instance can
/// be shared across concurrent page views. Search failures are reported in
/// the result envelope rather than as `Err` values, because every failure
/// here is recoverable at the caller boundary.
#[derive(Debug)]
pub struct GraylogClient {
    http: reqwest::Client,
    base_url: String,
    config: GraylogConfig,
    cache: ResponseCache,
}

impl GraylogClient {
    /// Create a client with default settings from a configuration.
    pub fn new(config: GraylogConfig) -> Result<Self, SearchError> {
        GraylogClientBuilder::new(config).build()
    }

    /// Create a client builder.
    pub fn builder(config: GraylogConfig) -> GraylogClientBuilder {
        GraylogClientBuilder::new(config)
    }

    /// Get the normalized API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Browser-viewable Graylog URL for human-facing links.
    pub fn external_url(&self) -> &str {
        self.config.external_url()
    }

    /// Get the active configuration.
    pub fn config(&self) -> &GraylogConfig {
        &self.config
    }

    /// Search for log messages.
    ///
    /// Time range and limit default to the configured values. A live cache
    /// entry for `(query, range, limit)` is returned without a network
    /// call; failures are returned in the envelope and never cached.
    pub async fn search(
        &self,
        query: &str,
        time_range: Option<Duration>,
        limit: Option<u64>,
        fields: Option<&[&str]>,
    ) -> LogSearchResult {
        let time_range = time_range.unwrap_or(self.config.time_range);
        let limit = limit.unwrap_or(self.config.log_limit);

        let Some(api_token) = self.config.graylog_api_token.as_ref() else {
            return LogSearchResult::failed(query, time_range, SearchError::Configuration);
        };

        let key = CacheKey::new(query, time_range, limit);
        if let Some(cached) = self.cache.get(&key).await {
            debug!(query, "returning cached search result");
            return cached;
        }

        let params = SearchParams {
            query,
            range: time_range,
            limit,
            fields,
        };

        match endpoints::relative_search(&self.http, &self.base_url, api_token, &params, self.config.timeout).await
        {
            Ok(response) => {
                let result = LogSearchResult::from_response(response, query, time_range);
                self.cache.insert(key, result.clone()).await;
                result
            }
            Err(err) => {
                error!(query, %err, "Graylog search failed");
                LogSearchResult::failed(query, time_range, err)
            }
        }
    }

    /// Get logs for a device: one query, combined with the primary IP when
    /// IP fallback is enabled.
    pub async fn get_logs_for_device(&self, device: &Device) -> LogSearchResult {
        let plan = query::device_query(device, &self.config);
        let mut result = self.search(&plan.query, None, None, None).await;
        result.strategy = plan.strategy;
        result.object_name = Some(device.name.clone());
        result
    }

    /// Get logs for a virtual machine, driving the ordered fallback plan.
    ///
    /// Each fallback runs only when the previous attempt returned zero
    /// messages and no error; an upstream error surfaces immediately. When
    /// every attempt comes back empty, the envelope carries the strategy of
    /// the last attempt made.
    pub async fn get_logs_for_vm(&self, vm: &VirtualMachine) -> LogSearchResult {
        let plan = query::vm_query_plan(vm, &self.config);

        let mut result = self.search(&plan.primary.query, None, None, None).await;
        result.strategy = plan.primary.strategy;

        for candidate in plan.fallbacks {
            if result.is_error() || result.has_messages() {
                break;
            }
            debug!(
                vm = vm.name,
                next = %candidate.strategy,
                "hostname search empty, trying fallback"
            );
            result = self.search(&candidate.query, None, None, None).await;
            result.strategy = candidate.strategy;
        }

        result.object_name = Some(vm.name.clone());
        result
    }

    /// Get logs for an endpoint, searched by name only.
    pub async fn get_logs_for_endpoint(&self, endpoint: &Endpoint) -> LogSearchResult {
        let plan = query::endpoint_query(endpoint, &self.config);
        let mut result = self.search(&plan.query, None, None, None).await;
        result.strategy = plan.strategy;
        result.object_name = Some(endpoint.name.clone());
        result
    }
}
