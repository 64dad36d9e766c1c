//! Domain Services
//!
//! Stateless domain logic operating on entities.
//! - Progression: experience accrual, level-ups, rank, stat growth
//! - Content parser: validation of generator output into typed lists
//! - Prompt: natural-language descriptors sent to the generator
//! - Fallback: built-in quests used when no generator is configured

mod content_parser;
mod fallback;
mod progression;
mod prompt;

pub use content_parser::*;
pub use fallback::*;
pub use progression::*;
pub use prompt::*;
