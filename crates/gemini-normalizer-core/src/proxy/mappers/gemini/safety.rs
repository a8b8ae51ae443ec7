// Safety settings injection
use gemini_normalizer_types::{SafetyConfig, SafetySetting};
use serde_json::Value;

use crate::proxy::common::json_path::{JsonPath, Segment};

/// Attaches safety settings to a request body.
///
/// Implementations must be additive and idempotent: an existing value at
/// `path` is never replaced or reordered.
pub trait SafetySettingsInjector: Send + Sync {
    fn attach(&self, body: &mut Value, path: &JsonPath);
}

/// Attaches a fixed list when the request carries no safety settings.
#[derive(Debug, Clone)]
pub struct DefaultSafetySettings {
    settings: Value,
}

impl DefaultSafetySettings {
    pub fn new(settings: &[SafetySetting]) -> Self {
        let settings = settings
            .iter()
            .filter_map(|s| serde_json::to_value(s).ok())
            .collect::<Vec<_>>();
        Self { settings: Value::Array(settings) }
    }

    pub fn from_config(config: &SafetyConfig) -> Self {
        Self::new(&config.settings)
    }
}

impl Default for DefaultSafetySettings {
    fn default() -> Self {
        Self::from_config(&SafetyConfig::default())
    }
}

impl SafetySettingsInjector for DefaultSafetySettings {
    fn attach(&self, body: &mut Value, path: &JsonPath) {
        // An append segment never resolves on read, so each run would add another list.
        if path.segments().contains(&Segment::Append) {
            tracing::warn!("[Gemini-Normalize] Skipped safety settings: '{}' is not a stable location", path);
            return;
        }
        if path.exists(body) {
            return;
        }
        match path.set(body, self.settings.clone()) {
            Ok(()) => tracing::debug!("[Gemini-Normalize] Attached default safety settings at '{}'", path),
            Err(e) => tracing::warn!("[Gemini-Normalize] Skipped safety settings: {}", e),
        }
    }
}
