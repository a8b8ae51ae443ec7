// Turn role normalization
//
// Gemini v1beta only accepts "user" and "model". Missing or invalid roles are
// filled greedily from the previous turn: the first turn defaults to "user",
// then the replacement alternates user/model.

use gemini_normalizer_types::protocol::keys;
use gemini_normalizer_types::GeminiRole;
use serde::Serialize;
use serde_json::{json, Value};

use crate::proxy::common::json_path::JsonPath;

/// Result of a role normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RoleReport {
    /// Role of the last turn after normalization (`None` for an empty sequence)
    pub last_role: Option<GeminiRole>,
    /// Number of turns whose role was replaced
    pub corrected: usize,
}

/// Replacement for a missing/invalid role given the previous turn's role.
pub fn next_role(previous: Option<GeminiRole>) -> GeminiRole {
    match previous {
        None => GeminiRole::User,
        Some(GeminiRole::User) => GeminiRole::Model,
        Some(GeminiRole::Model) => GeminiRole::User,
    }
}

/// Give every turn in `contents` a valid role.
///
/// A turn that cannot hold a role (not an object) keeps its shape, but the
/// computed replacement still feeds the next decision.
pub fn normalize_roles(body: &mut Value) -> RoleReport {
    let contents = JsonPath::root().key(keys::CONTENTS);
    let Some(len) = contents.array_len(body) else {
        return RoleReport::default();
    };

    let mut report = RoleReport::default();
    for idx in 0..len {
        let turn = contents.join_index(idx);
        let current = turn.get(body).and_then(GeminiRole::of_turn);
        let role = match current {
            Some(role) => role,
            None => {
                let replacement = next_role(report.last_role);
                match turn.join_key(keys::ROLE).set(body, json!(replacement.as_str())) {
                    Ok(()) => report.corrected += 1,
                    Err(e) => {
                        tracing::warn!("[Gemini-Normalize] Could not set role on turn {}: {}", idx, e)
                    }
                }
                replacement
            }
        };
        report.last_role = Some(role);
    }

    if report.corrected > 0 {
        tracing::debug!(
            "[Gemini-Normalize] Corrected {} of {} turn roles",
            report.corrected,
            len
        );
    }
    report
}
