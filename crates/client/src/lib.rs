//! Graylog log-search client.
//!
//! This crate turns inventory records (devices, virtual machines,
//! endpoints) into Lucene queries against Graylog's relative search API and
//! returns a uniform result envelope with caching and normalized errors.
//! Log messages are passed through verbatim; rendering belongs to the host
//! application.

pub mod cache;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod inventory;
pub mod models;
pub mod query;

pub use client::{GraylogClient, GraylogClientBuilder};
pub use error::SearchError;
pub use inventory::{Device, Endpoint, VirtualMachine};
pub use models::{
    LogSearchResult, QueryPlan, RelativeSearchResponse, SearchQuery, SearchStrategy,
};
