//! Typed JSON path resolver
//!
//! Addresses values inside a request document by an ordered list of key/index
//! segments instead of formatted path strings, so locators discovered at
//! runtime (e.g. `tools[i].function_declarations[j]`) stay structured.

mod path;

pub use path::{JsonPath, Segment};
