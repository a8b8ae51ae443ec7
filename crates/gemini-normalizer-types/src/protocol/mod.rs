//! Protocol definitions for the Gemini GenerateContent API.

pub mod gemini;

pub use gemini::{
    default_safety_settings, keys, GeminiRole, HarmBlockThreshold, HarmCategory, PartKind,
    SafetySetting,
};
