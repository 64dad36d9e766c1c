//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Profile: Persistent hunter record and progression state
//! - Onboarding: Data collected before awakening
//! - ActivityItem: Generated quest, completable once
//! - Tip / Drill: Generated guidance content
//! - Content: Content kinds, contexts and lists
//! - LevelUp: Events surfaced after experience gain

mod activity;
mod content;
mod drill;
mod level_up;
mod onboarding;
mod profile;
mod tip;

pub use activity::*;
pub use content::*;
pub use drill::*;
pub use level_up::*;
pub use onboarding::*;
pub use profile::*;
pub use tip::*;
