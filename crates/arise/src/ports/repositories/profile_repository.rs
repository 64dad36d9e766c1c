//! Profile Repository Port
//!
//! Abstract interface for the durable hunter profile record.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, Profile};

/// Repository interface for the single profile record
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the stored profile.
    ///
    /// Absent, unreadable, or structurally invalid records all yield `None`;
    /// a corrupt record forces onboarding again.
    async fn load(&self) -> Option<Profile>;

    /// Replace the stored profile as a whole
    async fn save(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Remove the stored profile
    async fn clear(&self) -> Result<(), DomainError>;
}
