//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod difficulty;
mod martial_style;
mod rank;
mod retry_policy;
mod stat_category;
mod training_location;

pub use difficulty::*;
pub use martial_style::*;
pub use rank::*;
pub use retry_policy::*;
pub use stat_category::*;
pub use training_location::*;

/// Normalize user-supplied enum names: lowercase, separators dropped.
pub(crate) fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
