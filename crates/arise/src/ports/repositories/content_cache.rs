//! Content Cache Port
//!
//! Abstract interface for caching generated content per context.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, ContentContext, ContentList};

/// Best-effort cache of generated content.
///
/// Entries never expire on their own; they are replaced on forced refresh
/// or removed through `invalidate`.
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// Cached list for `context`. Read failures count as a miss.
    async fn get(&self, context: &ContentContext) -> Option<ContentList>;

    /// Store `content` for `context`, overwriting any previous entry
    async fn put(&self, context: &ContentContext, content: &ContentList)
        -> Result<(), DomainError>;

    /// Drop the entry for `context`
    async fn invalidate(&self, context: &ContentContext) -> Result<(), DomainError>;
}
