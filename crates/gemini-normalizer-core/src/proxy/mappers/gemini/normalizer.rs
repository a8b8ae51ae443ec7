// Gemini request normalization pipeline
//
// Order is fixed: key migrations, roles, thought signatures, then the
// additive injections. Each stage only relies on what earlier stages
// guarantee, and every stage is idempotent.

use bytes::Bytes;
use gemini_normalizer_types::protocol::keys;
use gemini_normalizer_types::NormalizerConfig;
use serde::Serialize;
use serde_json::Value;

use super::roles::{normalize_roles, RoleReport};
use super::safety::{DefaultSafetySettings, SafetySettingsInjector};
use super::schema_keys::{migrate_response_schema_key, migrate_tool_schema_keys};
use super::system_instruction::{attach_system_instruction, InjectOutcome};
use super::thought_signature::stamp_thought_signatures;
use crate::proxy::common::json_path::JsonPath;

/// Summary of what one pipeline run changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// True when the request had no `contents` and only injections ran
    pub fast_path: bool,
    pub renamed_tool_keys: usize,
    pub response_schema_migrated: bool,
    pub roles: RoleReport,
    pub stamped_signatures: usize,
    pub system_instruction: InjectOutcome,
}

/// Stateless request normalizer; safe to share across threads.
pub struct RequestNormalizer {
    config: NormalizerConfig,
    safety_path: JsonPath,
    safety: Box<dyn SafetySettingsInjector>,
}

impl RequestNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        let safety = Box::new(DefaultSafetySettings::from_config(&config.safety));
        Self::with_safety_injector(config, safety)
    }

    /// Use a custom safety settings collaborator instead of the default list.
    pub fn with_safety_injector(
        config: NormalizerConfig,
        safety: Box<dyn SafetySettingsInjector>,
    ) -> Self {
        let safety_path = JsonPath::parse(&config.safety.path);
        Self { config, safety_path, safety }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Run the pipeline over an owned document.
    pub fn normalize_value(&self, mut body: Value) -> Value {
        self.normalize_in_place(&mut body);
        body
    }

    /// Run the pipeline in place and report what changed.
    pub fn normalize_in_place(&self, body: &mut Value) -> NormalizeReport {
        if !JsonPath::root().key(keys::CONTENTS).exists(body) {
            let system_instruction = self.inject_defaults(body);
            let report = NormalizeReport {
                fast_path: true,
                renamed_tool_keys: 0,
                response_schema_migrated: false,
                roles: RoleReport::default(),
                stamped_signatures: 0,
                system_instruction,
            };
            tracing::debug!("[Gemini-Normalize] {:?}", report);
            return report;
        }

        let renamed_tool_keys = migrate_tool_schema_keys(body);
        let response_schema_migrated = migrate_response_schema_key(body);
        let roles = normalize_roles(body);
        let stamped_signatures =
            stamp_thought_signatures(body, &self.config.thought_signature_sentinel);
        let system_instruction = self.inject_defaults(body);

        let report = NormalizeReport {
            fast_path: false,
            renamed_tool_keys,
            response_schema_migrated,
            roles,
            stamped_signatures,
            system_instruction,
        };
        tracing::debug!("[Gemini-Normalize] {:?}", report);
        report
    }

    /// Run the pipeline over raw request bytes.
    ///
    /// Input that is not a JSON object is returned unchanged.
    pub fn normalize_bytes(&self, raw: &[u8]) -> Bytes {
        let mut body: Value = match serde_json::from_slice(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("[Gemini-Normalize] Passing through unparseable body: {}", e);
                return Bytes::copy_from_slice(raw);
            }
        };
        if !body.is_object() {
            tracing::debug!("[Gemini-Normalize] Passing through non-object body");
            return Bytes::copy_from_slice(raw);
        }

        self.normalize_in_place(&mut body);

        match serde_json::to_vec(&body) {
            Ok(out) => Bytes::from(out),
            Err(e) => {
                tracing::warn!("[Gemini-Normalize] Failed to serialize normalized body: {}", e);
                Bytes::copy_from_slice(raw)
            }
        }
    }

    fn inject_defaults(&self, body: &mut Value) -> InjectOutcome {
        let outcome = attach_system_instruction(body, &self.config.system_instruction);
        self.safety.attach(body, &self.safety_path);
        outcome
    }
}

impl Default for RequestNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl std::fmt::Debug for RequestNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestNormalizer")
            .field("config", &self.config)
            .field("safety_path", &self.safety_path.to_string())
            .finish_non_exhaustive()
    }
}

/// Normalize a request body with the default configuration.
pub fn normalize_request(raw: &[u8]) -> Bytes {
    RequestNormalizer::default().normalize_bytes(raw)
}

#[cfg(test)]
#[path = "normalizer_tests.rs"]
mod normalizer_tests;

#[cfg(test)]
#[path = "property_tests.rs"]
mod property_tests;
