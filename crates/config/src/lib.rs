//! Configuration management for the Graylog log-search service.
//!
//! This crate provides the process-wide [`GraylogConfig`], a builder-style
//! [`ConfigLoader`] for environment-based loading with validation, and the
//! static-configuration persistence refusal.

pub mod constants;
mod loader;
pub mod persistence;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, validate};
pub use persistence::ConfigManager;
pub use types::{GraylogConfig, SearchField};
