// Gemini mapper 模块
// 负责 v1beta 请求规范化 (roles, schema keys, thought signatures, defaults)

pub mod normalizer;
pub mod roles;
pub mod safety;
pub mod schema_keys;
pub mod system_instruction;
pub mod thought_signature;

pub use normalizer::{normalize_request, NormalizeReport, RequestNormalizer};
pub use roles::{normalize_roles, RoleReport};
pub use safety::{DefaultSafetySettings, SafetySettingsInjector};
pub use schema_keys::{migrate_response_schema_key, migrate_tool_schema_keys};
pub use system_instruction::{attach_system_instruction, InjectOutcome};
pub use thought_signature::stamp_thought_signatures;
