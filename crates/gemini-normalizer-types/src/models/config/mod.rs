//! Normalizer configuration models.

mod normalizer;
mod safety;

pub use normalizer::{NormalizerConfig, DEFAULT_SYSTEM_INSTRUCTION, THOUGHT_SIGNATURE_SENTINEL};
pub use safety::SafetyConfig;
