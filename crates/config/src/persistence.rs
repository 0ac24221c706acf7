//! Runtime persistence refusal.
//!
//! Configuration is loaded once at process start and is read-only for the
//! process lifetime. A host UI may still offer a settings form; any attempt
//! to save through it must be rejected with an explanation rather than
//! silently dropped, so the refusal lives here as an explicit operation.

use tracing::warn;

use crate::loader::ConfigError;
use crate::types::GraylogConfig;

/// Handle for configuration persistence requests.
///
/// Every save attempt fails with [`ConfigError::StaticConfiguration`]:
/// settings are managed through the deployment configuration and take
/// effect on restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigManager;

impl ConfigManager {
    /// Create a new persistence handle.
    pub fn new() -> Self {
        Self
    }

    /// Reject a request to persist new settings at runtime.
    pub fn save(&self, _config: &GraylogConfig) -> Result<(), ConfigError> {
        warn!("rejected attempt to persist settings at runtime");
        Err(ConfigError::StaticConfiguration)
    }
}
