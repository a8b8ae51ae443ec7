//! Domain models for the normalizer.

mod config;

pub use config::{NormalizerConfig, SafetyConfig, DEFAULT_SYSTEM_INSTRUCTION, THOUGHT_SIGNATURE_SENTINEL};
