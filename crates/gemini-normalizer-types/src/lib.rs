//! # Gemini Normalizer Types
//!
//! Core types, models, and error definitions for the Gemini request normalizer.
//!
//! - **`error`** - Typed errors for JSON path writes and configuration
//! - **`models`** - Normalizer configuration (default instruction, sentinel, safety settings)
//! - **`protocol`** - Gemini wire vocabulary (roles, part kinds, harm categories)
//!
//! ## Architecture Role
//!
//! ```text
//!          gemini-normalizer-types (this crate)
//!                        │
//!                        ▼
//!              gemini-normalizer-core
//!                        │
//!                        ▼
//!              gemini-normalizer-cli
//! ```

pub mod error;
pub mod models;
pub mod protocol;

pub use error::{ConfigError, PathError, Result, TypedError};
pub use models::{NormalizerConfig, SafetyConfig};
pub use protocol::{GeminiRole, HarmBlockThreshold, HarmCategory, PartKind, SafetySetting};
