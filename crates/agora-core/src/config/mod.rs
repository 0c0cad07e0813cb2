pub mod defaults;
mod factorization_config;
mod observability_config;
mod selection_config;

pub use factorization_config::FactorizationConfig;
pub use observability_config::ObservabilityConfig;
pub use selection_config::{SelectionConfig, SelectionThresholds};

use serde::{Deserialize, Serialize};

use crate::errors::{AgoraError, AgoraResult};

/// Top-level configuration. Every section falls back to its defaults
/// when absent from the TOML source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgoraConfig {
    pub selection: SelectionConfig,
    pub factorization: FactorizationConfig,
    pub observability: ObservabilityConfig,
}

impl AgoraConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> AgoraResult<Self> {
        toml::from_str(source).map_err(|e| AgoraError::ConfigError(e.to_string()))
    }
}
