//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! the profile store, the content cache and the content generator.

mod content_gateway;
mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use content_gateway::ContentGateway;
pub use session::Session;
