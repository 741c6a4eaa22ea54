//! Configuration loading and management
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8080
//! query:
//!   default_page_size: 20
//!   request_timeout_ms: 5000
//! logging:
//!   filter: registrar=debug,tower_http=info
//!   ansi: false
//! entities:
//!   - singular: fee_payment
//!     enabled: false
//!   - singular: attendance_record
//!     plural: attendance
//! ```
//!
//! Every section is optional and falls back to its defaults.

use crate::core::deadline::Deadline;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Defaults applied to list requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page size used when a request does not send `pageSize`
    pub default_page_size: i64,

    /// Deadline for each storage call; absent or 0 disables it
    pub request_timeout_ms: Option<u64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 1,
            request_timeout_ms: None,
        }
    }
}

impl QueryConfig {
    /// A fresh deadline for one request
    pub fn deadline(&self) -> Deadline {
        Deadline::from_millis(self.request_timeout_ms)
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` takes precedence when set
    pub filter: String,

    /// Colored output
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Build the filter, preferring `RUST_LOG` over the configured directives
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.filter).map_err(|e| ConfigError::InvalidValue {
            field: "logging.filter".to_string(),
            message: e.to_string(),
        })
    }

    /// Install the global `tracing` subscriber
    ///
    /// Does nothing if a subscriber is already installed.
    pub fn init(&self) -> Result<(), ConfigError> {
        let filter = self.env_filter()?;
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(self.ansi)
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!(filter = %self.filter, "logging initialised");
        }
        Ok(())
    }
}

/// Per-entity exposure settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityConfig {
    /// Singular form (e.g., "student", "fee_payment")
    pub singular: String,

    /// URL segment override; defaults to the entity's own plural
    #[serde(default)]
    pub plural: Option<String>,

    /// Disabled entities get no routes
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Complete configuration of a registrar server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    pub server: ServerConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
    pub entities: Vec<EntityConfig>,
}

impl RegistrarConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by an environment variable, or the defaults when unset
    pub fn from_env_or_default(var: &str) -> Result<Self, ConfigError> {
        match std::env::var(var) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    /// Check value ranges and entity entries
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.default_page_size < 1 {
            return Err(ConfigError::InvalidValue {
                field: "query.default_page_size".to_string(),
                message: format!("must be at least 1, got {}", self.query.default_page_size),
            });
        }

        let mut seen = HashSet::new();
        for entity in &self.entities {
            if entity.singular.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "entities.singular".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            if !seen.insert(entity.singular.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "entities".to_string(),
                    message: format!("'{}' is configured twice", entity.singular),
                });
            }
            if let Some(plural) = &entity.plural {
                if plural.is_empty() || plural.contains('/') {
                    return Err(ConfigError::InvalidValue {
                        field: format!("entities.{}.plural", entity.singular),
                        message: format!("'{}' is not a valid URL segment", plural),
                    });
                }
            }
        }
        Ok(())
    }

    /// Settings for one entity, if configured
    pub fn entity(&self, singular: &str) -> Option<&EntityConfig> {
        self.entities.iter().find(|e| e.singular == singular)
    }

    /// Unconfigured entities are enabled
    pub fn is_enabled(&self, singular: &str) -> bool {
        self.entity(singular).is_none_or(|e| e.enabled)
    }

    /// URL segment for an entity, falling back to `default_plural`
    pub fn plural_for<'a>(&'a self, singular: &str, default_plural: &'a str) -> &'a str {
        self.entity(singular)
            .and_then(|e| e.plural.as_deref())
            .unwrap_or(default_plural)
    }
}
