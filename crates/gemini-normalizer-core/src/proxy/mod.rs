//! Request proxy layer: shared JSON utilities and protocol mappers.

pub mod common;
pub mod mappers;

pub use common::JsonPath;
pub use mappers::gemini::{normalize_request, RequestNormalizer};
