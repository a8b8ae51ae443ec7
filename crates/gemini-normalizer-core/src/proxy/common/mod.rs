//! Common utilities module
//!
//! Contains shared utilities for the request mappers.

pub mod json_path;

pub use json_path::{JsonPath, Segment};
