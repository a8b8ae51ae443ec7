//! Top-level normalizer configuration.

use serde::{Deserialize, Serialize};

use super::safety::SafetyConfig;
use crate::error::ConfigError;

/// Instruction guaranteed to appear once in every forwarded request.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are Antigravity, a powerful agentic AI coding assistant designed by the Google Deepmind team working on Advanced Agentic Coding.You are pair programming with a USER to solve their coding task. The task may require creating a new codebase, modifying or debugging an existing codebase, or simply answering a question.**Absolute paths only****Proactiveness**";

/// Value upstream accepts in place of a real thought signature.
pub const THOUGHT_SIGNATURE_SENTINEL: &str = "skip_thought_signature_validator";

/// Parameters of the normalization pipeline.
///
/// The pipeline order is fixed; only the injected values are configurable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Default system instruction text
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
    /// Token written into `thoughtSignature` of model function-call parts
    #[serde(default = "default_thought_signature_sentinel")]
    pub thought_signature_sentinel: String,
    /// Safety settings attached when the request has none
    #[serde(default)]
    pub safety: SafetyConfig,
}

fn default_system_instruction() -> String {
    DEFAULT_SYSTEM_INSTRUCTION.to_string()
}

fn default_thought_signature_sentinel() -> String {
    THOUGHT_SIGNATURE_SENTINEL.to_string()
}

impl NormalizerConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self {
            system_instruction: default_system_instruction(),
            thought_signature_sentinel: default_thought_signature_sentinel(),
            safety: SafetyConfig::default(),
        }
    }

    /// Reject values that would make the pipeline inject empty strings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.system_instruction.trim().is_empty() {
            return Err(ConfigError::empty_field("system_instruction"));
        }
        if self.thought_signature_sentinel.is_empty() {
            return Err(ConfigError::empty_field("thought_signature_sentinel"));
        }
        self.safety.validate()
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_filled_from_empty_object() {
        let config: NormalizerConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, NormalizerConfig::default());
        assert_eq!(config.thought_signature_sentinel, "skip_thought_signature_validator");
        assert!(config.system_instruction.starts_with("You are Antigravity"));
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"system_instruction":"Be brief."}"#;
        let config: NormalizerConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.system_instruction, "Be brief.");
        assert_eq!(config.thought_signature_sentinel, THOUGHT_SIGNATURE_SENTINEL);
        assert_eq!(config.safety, SafetyConfig::default());
    }

    #[test]
    fn test_validate_rejects_blank_instruction() {
        let config = NormalizerConfig { system_instruction: "  ".to_string(), ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { ref field, .. }) if field == "system_instruction"
        ));
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(NormalizerConfig::default().validate().is_ok());
    }
}
