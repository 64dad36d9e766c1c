//! ActivityItem - A generated quest, completable exactly once

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{StatCategory, TrainingLocation};

/// A quest in the active list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reps: String,
    pub sets: String,
    pub instructions: String,
    pub xp_reward: f64,
    pub category: StatCategory,
    #[serde(default)]
    pub completed: bool,
    /// Location the quest was generated for
    pub location: TrainingLocation,
}

impl ActivityItem {
    /// Reset the completion flag and stamp the generation context
    pub fn stamped(mut self, location: TrainingLocation) -> Self {
        self.completed = false;
        self.location = location;
        self
    }
}
