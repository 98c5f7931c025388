//! Registry configuration
//!
//! Describes which aliases a [`Registry`] starts with, so alias tables can live
//! in JSON or YAML next to the rules that use them.
//!
//! ```yaml
//! seed_defaults: true
//! aliases:
//!   integer: int
//!   text: StringValidator
//! ```

use crate::errors::{ConfigError, RegistryError};
use crate::registry::{Builtin, Registry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Registry Config
// ============================================================================

/// Initial contents of a registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Seed the built-in aliases (`array`, `bool`, `dict`, ...)
    pub seed_defaults: bool,

    /// Extra aliases, alias to built-in validator name
    pub aliases: BTreeMap<String, String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            aliases: BTreeMap::new(),
        }
    }
}

impl RegistryConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether built-in aliases are seeded
    pub fn seed_defaults(mut self, seed: bool) -> Self {
        self.seed_defaults = seed;
        self
    }

    /// Add an alias for a built-in validator
    pub fn alias(mut self, alias: impl Into<String>, validator: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), validator.into());
        self
    }

    /// Parse a config from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Parse a config from YAML text
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Load a config file, YAML for `.yaml` / `.yml`, JSON otherwise
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }
}

impl Registry {
    /// Build a registry from a config
    ///
    /// Every alias must name a built-in, and must not collide with a seeded
    /// alias. Nothing is instantiated until first use.
    pub fn from_config(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let registry = if config.seed_defaults {
            Self::with_defaults()
        } else {
            Self::new()
        };

        for (alias, validator) in &config.aliases {
            let builtin: Builtin = validator.parse()?;
            registry.register(alias.as_str(), builtin)?;
        }

        debug!("Built registry from config with {} aliases", registry.len());
        Ok(registry)
    }
}

// ============================================================================
// Tests
// ============================================================================
