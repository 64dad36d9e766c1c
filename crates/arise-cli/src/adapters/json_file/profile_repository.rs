//! JSON file implementation of ProfileRepository

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use arise::{DomainError, Profile, ProfileRepository};

use super::{remove_if_exists, write_atomically};

const PROFILE_FILE: &str = "profile.json";

/// Stores the profile as a single pretty-printed JSON document
pub struct JsonFileProfileRepository {
    path: PathBuf,
}

impl JsonFileProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at `<data_dir>/profile.json`
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileRepository for JsonFileProfileRepository {
    async fn load(&self) -> Option<Profile> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = ?self.path, "No saved profile");
                return None;
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read saved profile");
                return None;
            }
        };

        let mut profile: Profile = match serde_json::from_str(&content) {
            Ok(profile) => profile,
            Err(e) => {
                warn!(
                    path = ?self.path,
                    error = %e,
                    "Saved profile is corrupt, onboarding required"
                );
                return None;
            }
        };

        let repaired = profile.repair_martial_progress();
        if repaired > 0 {
            info!(repaired, "Filled missing martial progress entries");
        }

        if let Err(e) = profile.validate() {
            warn!(
                path = ?self.path,
                error = %e,
                "Saved profile failed validation, onboarding required"
            );
            return None;
        }

        Some(profile)
    }

    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(profile)
            .map_err(|e| DomainError::Repository(format!("Failed to serialize profile: {e}")))?;

        write_atomically(&self.path, &json).await.map_err(|e| {
            DomainError::Repository(format!("Failed to write profile to {:?}: {e}", self.path))
        })?;

        debug!(path = ?self.path, level = profile.level, "Profile saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        remove_if_exists(&self.path).await.map_err(|e| {
            DomainError::Repository(format!("Failed to remove profile {:?}: {e}", self.path))
        })
    }
}
