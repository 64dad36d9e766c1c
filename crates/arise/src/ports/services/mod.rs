//! Service Ports
//!
//! Abstract interfaces for external services.

mod content_generator;

pub use content_generator::*;
