//! Drill - Martial art practice item

use serde::{Deserialize, Serialize};

/// A drill for the active martial style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub title: String,
    pub description: String,
    pub reps: String,
    /// Physical drill as opposed to study/visualization
    pub is_physical: bool,
}
