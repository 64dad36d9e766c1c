//! JSON file implementation of ContentCache
//!
//! One file per context under the cache directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use arise::{ContentCache, ContentContext, ContentList, DomainError};

use super::{remove_if_exists, write_atomically};

const CACHE_DIR: &str = "cache";

/// On-disk cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord {
    key: String,
    cached_at: DateTime<Utc>,
    content: ContentList,
}

/// File-per-entry content cache
pub struct JsonFileContentCache {
    dir: PathBuf,
}

impl JsonFileContentCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache at `<data_dir>/cache`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(CACHE_DIR))
    }

    fn entry_path(&self, context: &ContentContext) -> PathBuf {
        let file: String = context
            .cache_key()
            .replace(':', "__")
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.dir.join(format!("{file}.json"))
    }

    /// Drop every cached entry
    pub async fn clear(&self) -> Result<(), DomainError> {
        match tokio::fs::remove_dir_all(&self.dir).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(DomainError::Repository(
                format!("Failed to clear cache {:?}: {e}", self.dir),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ContentCache for JsonFileContentCache {
    async fn get(&self, context: &ContentContext) -> Option<ContentList> {
        let path = self.entry_path(context);
        let content = tokio::fs::read_to_string(&path).await.ok()?;

        let record: CacheRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = ?path, error = %e, "Ignoring unreadable cache entry");
                return None;
            }
        };

        // Sanitized file names may collide; the stored key is authoritative
        if record.key != context.cache_key() || record.content.kind() != context.kind() {
            debug!(key = %record.key, "Cache entry belongs to another context");
            return None;
        }

        Some(record.content)
    }

    async fn put(
        &self,
        context: &ContentContext,
        content: &ContentList,
    ) -> Result<(), DomainError> {
        let record = CacheRecord {
            key: context.cache_key(),
            cached_at: Utc::now(),
            content: content.clone(),
        };
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|e| DomainError::Repository(format!("Failed to serialize cache entry: {e}")))?;

        let path = self.entry_path(context);
        write_atomically(&path, &json)
            .await
            .map_err(|e| DomainError::Repository(format!("Failed to write cache {:?}: {e}", path)))
    }

    async fn invalidate(&self, context: &ContentContext) -> Result<(), DomainError> {
        let path = self.entry_path(context);
        remove_if_exists(&path)
            .await
            .map_err(|e| DomainError::Repository(format!("Failed to remove cache {:?}: {e}", path)))
    }
}
