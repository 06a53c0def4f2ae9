//! Shared utilities.

/// Balanced JSON object extraction from streamed text.
pub mod json_extract;
/// TOML configuration loading and validation.
pub mod toml_config;
