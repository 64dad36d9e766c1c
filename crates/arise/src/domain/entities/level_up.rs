//! LevelUp - Events produced by experience gain

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{MartialStyle, Rank, StatCategory};

/// Independent leveling axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "track", content = "style", rename_all = "snake_case")]
pub enum Track {
    /// Primary hunter level
    Hunter,
    /// Secondary level of one martial style
    Martial(MartialStyle),
}

/// A level crossed on one track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub track: Track,
    pub new_level: u32,
}

impl LevelUp {
    pub fn hunter(new_level: u32) -> Self {
        Self {
            track: Track::Hunter,
            new_level,
        }
    }

    pub fn martial(style: MartialStyle, new_level: u32) -> Self {
        Self {
            track: Track::Martial(style),
            new_level,
        }
    }
}

/// Result of one experience gain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainOutcome {
    pub amount: f64,
    pub category: StatCategory,
    /// Every level crossed, in the order it happened
    pub level_ups: Vec<LevelUp>,
    pub previous_rank: Rank,
    pub rank: Rank,
}

impl GainOutcome {
    pub fn leveled_up(&self) -> bool {
        !self.level_ups.is_empty()
    }

    pub fn rank_changed(&self) -> bool {
        self.previous_rank != self.rank
    }
}
