//! Google Gemini GenerateContent API vocabulary used by the normalizer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Wire keys of the GenerateContent request body.
pub mod keys {
    pub const CONTENTS: &str = "contents";
    pub const ROLE: &str = "role";
    pub const PARTS: &str = "parts";
    pub const TEXT: &str = "text";
    pub const FUNCTION_CALL: &str = "functionCall";
    pub const THOUGHT_SIGNATURE: &str = "thoughtSignature";

    pub const TOOLS: &str = "tools";
    pub const FUNCTION_DECLARATIONS_LEGACY: &str = "functionDeclarations";
    pub const FUNCTION_DECLARATIONS: &str = "function_declarations";
    pub const PARAMETERS_LEGACY: &str = "parameters";
    pub const PARAMETERS_JSON_SCHEMA: &str = "parametersJsonSchema";

    pub const GENERATION_CONFIG: &str = "generationConfig";
    pub const RESPONSE_SCHEMA_LEGACY: &str = "responseSchema";
    pub const RESPONSE_JSON_SCHEMA: &str = "responseJsonSchema";

    pub const SYSTEM_INSTRUCTION: &str = "system_instruction";
    pub const REQUEST: &str = "request";
    pub const SYSTEM_INSTRUCTION_CAMEL: &str = "systemInstruction";

    pub const SAFETY_SETTINGS: &str = "safetySettings";
}

/// Gemini content role. Only these two values are accepted upstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GeminiRole {
    User,
    Model,
}

impl GeminiRole {
    /// Parse a wire role. Exact, case-sensitive match.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "model" => Some(Self::Model),
            _ => None,
        }
    }

    /// Read the role of a turn; `None` when absent, non-string or invalid.
    pub fn of_turn(turn: &Value) -> Option<Self> {
        turn.get(keys::ROLE).and_then(Value::as_str).and_then(Self::parse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for GeminiRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of a content part, as far as the normalizer cares.
///
/// A part carrying both a function call and a signature classifies as
/// `FunctionCall`; anything else passes through as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Text,
    FunctionCall,
    ThoughtSignature,
    Other,
}

impl PartKind {
    pub fn classify(part: &Value) -> Self {
        let Some(obj) = part.as_object() else {
            return Self::Other;
        };
        if obj.contains_key(keys::FUNCTION_CALL) {
            Self::FunctionCall
        } else if obj.contains_key(keys::THOUGHT_SIGNATURE) {
            Self::ThoughtSignature
        } else if obj.contains_key(keys::TEXT) {
            Self::Text
        } else {
            Self::Other
        }
    }

    /// Whether assistant-authored parts of this kind need a thought signature.
    pub fn needs_thought_signature(self) -> bool {
        matches!(self, Self::FunctionCall | Self::ThoughtSignature)
    }
}

/// Gemini harm category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
    HarmCategoryCivicIntegrity,
}

/// Gemini block threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    Off,
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// One entry of the `safetySettings` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub const fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self { category, threshold }
    }
}

/// Safety settings attached when a request carries none.
pub fn default_safety_settings() -> Vec<SafetySetting> {
    use HarmBlockThreshold::{BlockNone, Off};
    use HarmCategory::*;
    vec![
        SafetySetting::new(HarmCategoryHarassment, Off),
        SafetySetting::new(HarmCategoryHateSpeech, Off),
        SafetySetting::new(HarmCategorySexuallyExplicit, Off),
        SafetySetting::new(HarmCategoryDangerousContent, Off),
        SafetySetting::new(HarmCategoryCivicIntegrity, BlockNone),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(GeminiRole::parse("user"), Some(GeminiRole::User));
        assert_eq!(GeminiRole::parse("model"), Some(GeminiRole::Model));
        assert_eq!(GeminiRole::parse("User"), None);
        assert_eq!(GeminiRole::parse("assistant"), None);
        assert_eq!(GeminiRole::parse(""), None);
    }

    #[test]
    fn test_role_of_turn_ignores_non_strings() {
        assert_eq!(GeminiRole::of_turn(&json!({"role": "model"})), Some(GeminiRole::Model));
        assert_eq!(GeminiRole::of_turn(&json!({"role": 1})), None);
        assert_eq!(GeminiRole::of_turn(&json!({"parts": []})), None);
        assert_eq!(GeminiRole::of_turn(&json!("user")), None);
    }

    #[test]
    fn test_part_classification() {
        assert_eq!(PartKind::classify(&json!({"text": "hi"})), PartKind::Text);
        assert_eq!(PartKind::classify(&json!({"functionCall": {}})), PartKind::FunctionCall);
        assert_eq!(
            PartKind::classify(&json!({"functionCall": {}, "thoughtSignature": "abc"})),
            PartKind::FunctionCall
        );
        assert_eq!(
            PartKind::classify(&json!({"text": "x", "thoughtSignature": "abc"})),
            PartKind::ThoughtSignature
        );
        assert_eq!(PartKind::classify(&json!({"inlineData": {}})), PartKind::Other);
        assert_eq!(PartKind::classify(&json!(42)), PartKind::Other);
    }

    #[test]
    fn test_safety_setting_wire_format() {
        let setting =
            SafetySetting::new(HarmCategory::HarmCategoryCivicIntegrity, HarmBlockThreshold::BlockNone);
        let value = serde_json::to_value(setting).unwrap();
        assert_eq!(
            value,
            json!({"category": "HARM_CATEGORY_CIVIC_INTEGRITY", "threshold": "BLOCK_NONE"})
        );
    }

    #[test]
    fn test_default_safety_settings_cover_all_categories() {
        let settings = default_safety_settings();
        assert_eq!(settings.len(), 5);
        assert!(settings
            .iter()
            .filter(|s| s.category != HarmCategory::HarmCategoryCivicIntegrity)
            .all(|s| s.threshold == HarmBlockThreshold::Off));
    }
}
