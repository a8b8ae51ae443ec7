//! Ambient modules: configuration files and logging setup.

pub mod config;
pub mod logger;
