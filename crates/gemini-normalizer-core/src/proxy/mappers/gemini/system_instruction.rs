// Default system instruction injection
use gemini_normalizer_types::protocol::keys;
use gemini_normalizer_types::PathError;
use serde::Serialize;
use serde_json::{json, Value};

use crate::proxy::common::json_path::JsonPath;

/// What the injector did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectOutcome {
    /// A part already carries the exact instruction text.
    AlreadyPresent,
    /// The instruction was appended to an existing parts list.
    Appended,
    /// A new parts list was created holding only the instruction.
    Created,
    /// The location could not be written; the document is unchanged.
    Skipped,
}

/// Candidate system instruction locations, highest priority first.
pub fn system_instruction_paths() -> [JsonPath; 2] {
    [
        JsonPath::root().key(keys::SYSTEM_INSTRUCTION),
        JsonPath::root().key(keys::REQUEST).key(keys::SYSTEM_INSTRUCTION_CAMEL),
    ]
}

/// First existing candidate location, falling back to the canonical one.
pub fn resolve_system_instruction_path(body: &Value) -> JsonPath {
    let [canonical, alternate] = system_instruction_paths();
    if canonical.exists(body) {
        canonical
    } else if alternate.exists(body) {
        alternate
    } else {
        canonical
    }
}

/// Ensure `instruction` appears exactly once among the system instruction parts.
///
/// Never fails: a location that cannot be written leaves the body unchanged.
pub fn attach_system_instruction(body: &mut Value, instruction: &str) -> InjectOutcome {
    let path = resolve_system_instruction_path(body);
    match attach_at(body, &path, instruction) {
        Ok(outcome) => {
            tracing::debug!("[Gemini-Normalize] System instruction at '{}': {:?}", path, outcome);
            outcome
        }
        Err(e) => {
            tracing::warn!("[Gemini-Normalize] Skipped system instruction injection: {}", e);
            InjectOutcome::Skipped
        }
    }
}

fn attach_at(body: &mut Value, path: &JsonPath, instruction: &str) -> Result<InjectOutcome, PathError> {
    let parts_path = path.join_key(keys::PARTS);

    let outcome = match parts_path.get(body).and_then(Value::as_array) {
        Some(parts) => {
            let present = parts
                .iter()
                .any(|p| p.get(keys::TEXT).and_then(Value::as_str) == Some(instruction));
            if present {
                return Ok(InjectOutcome::AlreadyPresent);
            }
            parts_path.clone().append().set(body, json!({ "text": instruction }))?;
            InjectOutcome::Appended
        }
        None => {
            parts_path.clone().index(0).set(body, json!({ "text": instruction }))?;
            InjectOutcome::Created
        }
    };

    // The parts write succeeded, so the location is an object and this cannot fail.
    let role_path = path.join_key(keys::ROLE);
    if !role_path.exists(body) {
        role_path.set(body, json!("user"))?;
    }

    Ok(outcome)
}
