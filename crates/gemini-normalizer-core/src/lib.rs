//! # Gemini Normalizer Core
//!
//! Request normalization for the Gemini `generateContent` API.
//!
//! ## Architecture
//!
//! ```text
//! gemini-normalizer-core/src/
//! ├── proxy/
//! │   ├── common/json_path/   # typed key/index locator with get/set/rename
//! │   └── mappers/gemini/     # pipeline stages + RequestNormalizer
//! └── modules/
//!     ├── config.rs           # NormalizerConfig file loading/saving
//!     └── logger.rs           # tracing subscriber setup for binaries
//! ```
//!
//! The pipeline never fails a request: writes that do not fit the document
//! shape are skipped and the input passes through unchanged.

#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::indexing_slicing
    )
)]

pub mod modules;
pub mod proxy;

pub use proxy::mappers::gemini::{normalize_request, NormalizeReport, RequestNormalizer};
pub use proxy::JsonPath;
