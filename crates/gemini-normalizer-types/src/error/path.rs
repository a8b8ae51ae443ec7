//! JSON path write errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a write through a JSON path cannot be applied.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum PathError {
    /// The path has no segments, so there is no slot to write.
    #[error("Cannot write through an empty path")]
    EmptyPath,

    /// A segment met a value of the wrong shape (e.g. a key segment on a string).
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Dotted path up to and including the failing segment
        path: String,
        /// Container kind the segment needs
        expected: String,
        /// JSON kind actually found
        found: String,
    },

    /// An index segment points past the end of an array.
    #[error("Index {index} out of bounds at {path} (len {len})")]
    IndexOutOfBounds {
        /// Dotted path up to and including the failing segment
        path: String,
        /// Requested index
        index: usize,
        /// Array length at that location
        len: usize,
    },
}

impl PathError {
    /// Build a type mismatch error for the given JSON kind names.
    pub fn type_mismatch(path: impl Into<String>, expected: &str, found: &str) -> Self {
        Self::TypeMismatch { path: path.into(), expected: expected.to_string(), found: found.to_string() }
    }
}
