//! Infrastructure Adapters
//!
//! Implementations of domain ports for local storage.

pub mod json_file;

// Re-exports
pub use json_file::{JsonFileContentCache, JsonFileProfileRepository};
