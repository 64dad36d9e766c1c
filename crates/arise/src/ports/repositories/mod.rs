//! Repository Ports
//!
//! Abstract interfaces for local persistence.

mod content_cache;
mod profile_repository;

pub use content_cache::*;
pub use profile_repository::*;
