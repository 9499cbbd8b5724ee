//! Configuration file support for autoload
//!
//! Loads and validates discovery settings from TOML files. Every field has
//! a default, so an empty or missing file yields a usable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{AutoloadError, AutoloadResult};
use crate::mapping::MappingStrategy;
use crate::resolver::DEFAULT_MAX_DEPTH;

/// Discovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Maximum `containedIn` hops when resolving one ancestor
    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,

    /// Port to interface mapping source
    #[serde(default)]
    pub mapping: MappingStrategy,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Complete autoload configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoloadConfig {
    /// Discovery configuration
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_max_ancestor_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: default_max_ancestor_depth(),
            mapping: MappingStrategy::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AutoloadConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> AutoloadResult<Self> {
        toml::from_str(content)
            .map_err(|e| AutoloadError::config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> AutoloadResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| {
                AutoloadError::config(format!("{}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(AutoloadError::Io(e)),
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> AutoloadResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AutoloadError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> AutoloadResult<()> {
        if self.discovery.max_ancestor_depth == 0 {
            return Err(AutoloadError::config("max_ancestor_depth must be > 0"));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            AutoloadError::config(format!("invalid log level {:?}: {}", self.logging.level, e))
        })?;

        Ok(())
    }
}
