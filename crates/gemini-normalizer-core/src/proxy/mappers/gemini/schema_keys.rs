// Legacy schema key migration
//
// Older clients send `functionDeclarations` / `parameters` / `responseSchema`.
// The upstream JSON-schema variants expect `function_declarations`,
// `parametersJsonSchema` and `responseJsonSchema`. A rename moves the value
// unchanged, so a second pass finds nothing left to migrate.

use gemini_normalizer_types::protocol::keys;
use serde_json::Value;

use crate::proxy::common::json_path::JsonPath;

/// Rename `from` to `to`, logging and swallowing malformed writes.
fn migrate_key(body: &mut Value, from: &JsonPath, to: &JsonPath) -> bool {
    match JsonPath::rename(body, from, to) {
        Ok(renamed) => {
            if renamed {
                tracing::debug!("[Gemini-Normalize] Renamed '{}' -> '{}'", from, to);
            }
            renamed
        }
        Err(e) => {
            tracing::warn!("[Gemini-Normalize] Could not rename '{}': {}", from, e);
            false
        }
    }
}

/// Migrate tool declaration keys. Returns the number of renamed keys.
pub fn migrate_tool_schema_keys(body: &mut Value) -> usize {
    let tools = JsonPath::root().key(keys::TOOLS);
    let Some(tool_count) = tools.array_len(body) else {
        return 0;
    };

    let mut renamed = 0;
    for i in 0..tool_count {
        let tool = tools.join_index(i);
        let declarations = tool.join_key(keys::FUNCTION_DECLARATIONS);
        let legacy = tool.join_key(keys::FUNCTION_DECLARATIONS_LEGACY);
        if legacy.exists(body) && migrate_key(body, &legacy, &declarations) {
            renamed += 1;
        }

        let Some(decl_count) = declarations.array_len(body) else {
            continue;
        };
        for j in 0..decl_count {
            let decl = declarations.join_index(j);
            let params = decl.join_key(keys::PARAMETERS_LEGACY);
            if params.exists(body)
                && migrate_key(body, &params, &decl.join_key(keys::PARAMETERS_JSON_SCHEMA))
            {
                renamed += 1;
            }
        }
    }
    renamed
}

/// Migrate `generationConfig.responseSchema`. Returns whether it was renamed.
pub fn migrate_response_schema_key(body: &mut Value) -> bool {
    let config = JsonPath::root().key(keys::GENERATION_CONFIG);
    let legacy = config.join_key(keys::RESPONSE_SCHEMA_LEGACY);
    legacy.exists(body) && migrate_key(body, &legacy, &config.join_key(keys::RESPONSE_JSON_SCHEMA))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_declarations_and_parameters_renamed() {
        let mut body =
            json!({"tools": [{"functionDeclarations": [{"parameters": {"type": "object"}}]}]});

        assert_eq!(migrate_tool_schema_keys(&mut body), 2);
        assert_eq!(
            body,
            json!({"tools": [{"function_declarations": [{"parametersJsonSchema": {"type": "object"}}]}]})
        );
    }

    #[test]
    fn test_already_current_declarations_still_get_parameters_migrated() {
        let mut body = json!({
            "tools": [
                {"googleSearch": {}},
                {"function_declarations": [
                    {"name": "a", "parameters": {"type": "object", "properties": {"x": {"type": "string"}}}},
                    {"name": "b", "parametersJsonSchema": {"type": "object"}},
                    {"name": "c"}
                ]}
            ]
        });

        assert_eq!(migrate_tool_schema_keys(&mut body), 1);
        let decls = &body["tools"][1]["function_declarations"];
        assert!(decls[0].get("parameters").is_none());
        assert_eq!(decls[0]["parametersJsonSchema"]["properties"]["x"]["type"], "string");
        assert_eq!(decls[1]["parametersJsonSchema"], json!({"type": "object"}));
        assert_eq!(decls[2], json!({"name": "c"}));
        assert_eq!(body["tools"][0], json!({"googleSearch": {}}));
    }

    #[test]
    fn test_legacy_key_wins_over_current() {
        let mut body = json!({
            "tools": [{"functionDeclarations": [{"name": "new"}], "function_declarations": [{"name": "old"}]}]
        });

        migrate_tool_schema_keys(&mut body);

        assert_eq!(body["tools"][0], json!({"function_declarations": [{"name": "new"}]}));
    }

    #[test]
    fn test_non_array_tools_ignored() {
        let original = json!({"tools": {"functionDeclarations": []}});
        let mut body = original.clone();
        assert_eq!(migrate_tool_schema_keys(&mut body), 0);
        assert_eq!(body, original);
    }

    #[test]
    fn test_tool_migration_is_idempotent() {
        let mut body = json!({
            "tools": [{"functionDeclarations": [{"parameters": {}}, {"parameters": {}}]}]
        });
        assert_eq!(migrate_tool_schema_keys(&mut body), 3);
        let once = body.clone();
        assert_eq!(migrate_tool_schema_keys(&mut body), 0);
        assert_eq!(body, once);
    }

    #[test]
    fn test_response_schema_renamed() {
        let mut body = json!({
            "generationConfig": {"temperature": 0.5, "responseSchema": {"type": "array"}}
        });

        assert!(migrate_response_schema_key(&mut body));
        assert!(!migrate_response_schema_key(&mut body));
        assert_eq!(
            body["generationConfig"],
            json!({"temperature": 0.5, "responseJsonSchema": {"type": "array"}})
        );
    }

    #[test]
    fn test_missing_generation_config_untouched() {
        let mut body = json!({"contents": []});
        assert!(!migrate_response_schema_key(&mut body));
        assert_eq!(body, json!({"contents": []}));
    }
}
