//! Validator configuration
//!
//! Loaded from TOML or built in code. Every field has a default, so an empty
//! document is a valid configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Literal handed to the message constructors.
pub const DEFAULT_PROBE_MESSAGE: &str = "My Message TeXT";

/// What to do after the first failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    FailFast,
    /// Keep going and report every failure that can be detected.
    CollectAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub probe_message: String,
    pub failure_policy: FailurePolicy,
    /// When false the serialization constructor check is skipped.
    pub require_serialization_constructor: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            probe_message: DEFAULT_PROBE_MESSAGE.to_string(),
            failure_policy: FailurePolicy::FailFast,
            require_serialization_constructor: true,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn load_from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_message.is_empty() {
            // An empty probe is contained in every message.
            return Err(ConfigError::InvalidValue {
                field: "probe_message",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_probe_message(mut self, probe_message: impl Into<String>) -> Self {
        self.probe_message = probe_message.into();
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn collect_all(self) -> Self {
        self.with_failure_policy(FailurePolicy::CollectAll)
    }

    pub fn without_serialization_constructor(mut self) -> Self {
        self.require_serialization_constructor = false;
        self
    }
}
