//! Safety settings injection configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::protocol::{default_safety_settings, keys, SafetySetting};

/// Where and what to attach when a request has no safety settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyConfig {
    /// Dotted path of the safety settings field (e.g. `safetySettings`)
    #[serde(default = "default_safety_path")]
    pub path: String,
    /// Settings written when the field is absent
    #[serde(default = "default_safety_settings")]
    pub settings: Vec<SafetySetting>,
}

fn default_safety_path() -> String {
    keys::SAFETY_SETTINGS.to_string()
}

impl SafetyConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.path.split('.').any(str::is_empty) {
            return Err(ConfigError::ValidationError {
                field: "safety.path".to_string(),
                message: format!("invalid dotted path '{}'", self.path),
            });
        }
        if self.path.split('.').any(|segment| segment == "-1") {
            return Err(ConfigError::ValidationError {
                field: "safety.path".to_string(),
                message: format!("append segment '-1' in '{}' never resolves to existing settings", self.path),
            });
        }
        Ok(())
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self { path: default_safety_path(), settings: default_safety_settings() }
    }
}
