//! Typed error definitions for the normalizer.
//!
//! Neither error kind ever fails a request: path errors are collapsed into
//! no-op writes by the pipeline, config errors only surface while loading
//! configuration outside the request path.

mod config;
mod path;

pub use config::ConfigError;
pub use path::PathError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type wrapping the domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum TypedError {
    /// Wraps a JSON path write error
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Wraps a configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Standard Result type using TypedError.
pub type Result<T> = std::result::Result<T, TypedError>;
