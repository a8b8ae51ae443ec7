// Thought signature stamping for model-authored function calls
//
// Upstream rejects model function calls without a valid thoughtSignature.
// Historical turns replayed by clients rarely carry the original one, so
// every such part gets the validator-bypass sentinel instead.

use gemini_normalizer_types::protocol::keys;
use gemini_normalizer_types::{GeminiRole, PartKind};
use serde_json::{json, Value};

use crate::proxy::common::json_path::JsonPath;

/// Stamp `sentinel` on every function-call or signed part of "model" turns.
///
/// Returns the number of stamped parts. Must run after role normalization.
pub fn stamp_thought_signatures(body: &mut Value, sentinel: &str) -> usize {
    let contents = JsonPath::root().key(keys::CONTENTS);
    let Some(turns) = contents.array_len(body) else {
        return 0;
    };

    let mut stamped = 0;
    for t in 0..turns {
        let turn = contents.join_index(t);
        if turn.get(body).and_then(GeminiRole::of_turn) != Some(GeminiRole::Model) {
            continue;
        }

        let parts = turn.join_key(keys::PARTS);
        let Some(len) = parts.array_len(body) else {
            continue;
        };
        for p in 0..len {
            let part = parts.join_index(p);
            let kind = part.get(body).map_or(PartKind::Other, PartKind::classify);
            if !kind.needs_thought_signature() {
                continue;
            }
            // Parts are known to be objects here, so the write cannot fail.
            if part.join_key(keys::THOUGHT_SIGNATURE).set(body, json!(sentinel)).is_ok() {
                stamped += 1;
            }
        }
    }

    if stamped > 0 {
        tracing::debug!("[Gemini-Normalize] Stamped thought signature on {} part(s)", stamped);
    }
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: &str = "skip_thought_signature_validator";

    #[test]
    fn test_model_function_call_is_stamped() {
        let mut body = json!({
            "contents": [{"role": "model", "parts": [{"functionCall": {}}]}]
        });

        assert_eq!(stamp_thought_signatures(&mut body, SENTINEL), 1);
        assert_eq!(body["contents"][0]["parts"][0]["thoughtSignature"], SENTINEL);
        assert_eq!(body["contents"][0]["parts"][0]["functionCall"], json!({}));
    }

    #[test]
    fn test_user_function_call_is_left_alone() {
        let original = json!({
            "contents": [{"role": "user", "parts": [{"functionCall": {}}]}]
        });
        let mut body = original.clone();

        assert_eq!(stamp_thought_signatures(&mut body, SENTINEL), 0);
        assert_eq!(body, original);
    }

    #[test]
    fn test_existing_signature_is_overwritten() {
        let mut body = json!({
            "contents": [{
                "role": "model",
                "parts": [
                    {"text": "thinking...", "thoughtSignature": "real-but-stale"},
                    {"text": "plain answer"},
                    {"functionCall": {"name": "get_weather", "args": {"city": "Paris"}}}
                ]
            }]
        });

        assert_eq!(stamp_thought_signatures(&mut body, SENTINEL), 2);
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["thoughtSignature"], SENTINEL);
        assert!(parts[1].get("thoughtSignature").is_none());
        assert_eq!(parts[2]["thoughtSignature"], SENTINEL);
        assert_eq!(parts[2]["functionCall"]["args"]["city"], "Paris");
    }

    #[test]
    fn test_malformed_parts_are_skipped() {
        let original = json!({
            "contents": [
                {"role": "model", "parts": "not a list"},
                {"role": "model"},
                {"role": "model", "parts": [42, null]}
            ]
        });
        let mut body = original.clone();

        assert_eq!(stamp_thought_signatures(&mut body, SENTINEL), 0);
        assert_eq!(body, original);
    }

    #[test]
    fn test_stamping_is_idempotent() {
        let mut body = json!({
            "contents": [{"role": "model", "parts": [{"functionCall": {"name": "f"}}]}]
        });
        stamp_thought_signatures(&mut body, SENTINEL);
        let once = body.clone();
        stamp_thought_signatures(&mut body, SENTINEL);
        assert_eq!(body, once);
    }
}
