//! Profile - Persistent hunter identity and progression state
//!
//! Pure domain entity without infrastructure dependencies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Difficulty, MartialStyle, Rank, TrainingLocation};

use super::Onboarding;

/// Starting value of every stat
pub const BASE_STAT: f64 = 10.0;

/// Hunter XP needed per level: threshold is `level * HUNTER_XP_PER_LEVEL`
pub const HUNTER_XP_PER_LEVEL: f64 = 100.0;

/// Martial XP needed per level: threshold is `level * MARTIAL_XP_PER_LEVEL`
pub const MARTIAL_XP_PER_LEVEL: f64 = 80.0;

/// Highest reachable level on any track; surplus XP at the cap is dropped
pub const MAX_LEVEL: u32 = 10_000;

/// The five hunter stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: f64,
    pub agility: f64,
    pub vitality: f64,
    pub intelligence: f64,
    pub sense: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: BASE_STAT,
            agility: BASE_STAT,
            vitality: BASE_STAT,
            intelligence: BASE_STAT,
            sense: BASE_STAT,
        }
    }
}

impl Stats {
    /// Sum of all stats
    pub fn combat_power(&self) -> f64 {
        self.strength + self.agility + self.vitality + self.intelligence + self.sense
    }

    fn all(&self) -> [f64; 5] {
        [
            self.strength,
            self.agility,
            self.vitality,
            self.intelligence,
            self.sense,
        ]
    }
}

/// Level and carried XP of one martial style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MartialProgress {
    pub level: u32,
    pub xp: f64,
}

impl Default for MartialProgress {
    fn default() -> Self {
        Self { level: 1, xp: 0.0 }
    }
}

impl MartialProgress {
    /// XP needed to leave the current level
    pub fn threshold(&self) -> f64 {
        f64::from(self.level) * MARTIAL_XP_PER_LEVEL
    }
}

/// Profile - The hunter record, single source of truth for progression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: String,
    pub daily_goal: String,
    pub difficulty: Difficulty,
    pub level: u32,
    pub xp: f64,
    pub rank: Rank,
    pub stats: Stats,
    pub awakened: bool,
    pub preferred_location: Option<TrainingLocation>,
    pub martial_style: MartialStyle,
    pub martial_progress: BTreeMap<MartialStyle, MartialProgress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a freshly awakened level 1 hunter from onboarding data
    pub fn awaken(onboarding: Onboarding) -> Result<Self, DomainError> {
        onboarding.validate()?;
        let now = Utc::now();
        Ok(Self {
            name: onboarding.name.trim().to_string(),
            age: onboarding.age,
            height_cm: onboarding.height_cm,
            weight_kg: onboarding.weight_kg,
            gender: onboarding.gender,
            daily_goal: onboarding.daily_goal,
            difficulty: onboarding.difficulty,
            level: 1,
            xp: 0.0,
            rank: Rank::E,
            stats: Stats::default(),
            awakened: true,
            preferred_location: Some(onboarding.location),
            martial_style: onboarding.martial_style,
            martial_progress: MartialStyle::ALL
                .iter()
                .map(|style| (*style, MartialProgress::default()))
                .collect(),
            created_at: now,
            updated_at: now,
        })
    }

    /// XP needed to leave the current hunter level
    pub fn threshold(&self) -> f64 {
        f64::from(self.level) * HUNTER_XP_PER_LEVEL
    }

    /// Progress of the active martial style, `None` when no style is practiced
    pub fn active_martial_progress(&self) -> Option<MartialProgress> {
        if self.martial_style.is_none() {
            return None;
        }
        Some(
            self.martial_progress
                .get(&self.martial_style)
                .copied()
                .unwrap_or_default(),
        )
    }

    /// Fill in martial progress entries missing from an older record.
    ///
    /// Returns the number of entries added.
    pub fn repair_martial_progress(&mut self) -> usize {
        let mut added = 0;
        for style in MartialStyle::ALL {
            if !self.martial_progress.contains_key(&style) {
                self.martial_progress.insert(style, MartialProgress::default());
                added += 1;
            }
        }
        added
    }

    /// Structural integrity check applied to loaded records
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("profile has no name".to_string()));
        }
        if self.level == 0 || self.level > MAX_LEVEL {
            return Err(DomainError::Validation(format!(
                "level {} outside 1..={}",
                self.level, MAX_LEVEL
            )));
        }
        if !self.xp.is_finite() || self.xp < 0.0 || self.xp >= self.threshold() {
            return Err(DomainError::Validation(format!(
                "xp {} out of range for level {}",
                self.xp, self.level
            )));
        }
        if self.stats.all().iter().any(|v| !v.is_finite()) {
            return Err(DomainError::Validation("stats must be finite".to_string()));
        }
        for (style, progress) in &self.martial_progress {
            if progress.level == 0
                || progress.level > MAX_LEVEL
                || !progress.xp.is_finite()
                || progress.xp < 0.0
            {
                return Err(DomainError::Validation(format!(
                    "invalid martial progress for {}",
                    style
                )));
            }
        }
        Ok(())
    }

    /// Short descriptor of the hunter used in generator prompts
    pub fn descriptor(&self) -> String {
        format!(
            "{} year old {}, {:.0} cm, {:.0} kg, hunter level {} (rank {}), goal: {}",
            self.age,
            self.gender.to_lowercase(),
            self.height_cm,
            self.weight_kg,
            self.level,
            self.rank,
            self.daily_goal
        )
    }
}
