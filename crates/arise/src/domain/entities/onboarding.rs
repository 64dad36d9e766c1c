//! Onboarding - Data collected before a hunter awakens

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Difficulty, MartialStyle, TrainingLocation};

/// Onboarding answers. Defaults mirror a typical first-time hunter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Onboarding {
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub daily_goal: String,
    pub difficulty: Difficulty,
    pub location: TrainingLocation,
    pub martial_style: MartialStyle,
}

impl Default for Onboarding {
    fn default() -> Self {
        Self {
            name: "Hunter".to_string(),
            gender: "Male".to_string(),
            age: 24,
            height_cm: 175.0,
            weight_kg: 75.0,
            daily_goal: "Health".to_string(),
            difficulty: Difficulty::Normal,
            location: TrainingLocation::Home,
            martial_style: MartialStyle::None,
        }
    }
}

impl Onboarding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_martial_style(mut self, style: MartialStyle) -> Self {
        self.martial_style = style;
        self
    }

    /// Text answers must not be blank, numeric answers must be positive
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("gender", &self.gender),
            ("daily goal", &self.daily_goal),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{} is required", field)));
            }
        }
        if self.age == 0 {
            return Err(DomainError::Validation("age must be positive".to_string()));
        }
        for (field, value) in [("height", self.height_cm), ("weight", self.weight_kg)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DomainError::Validation(format!("{} must be positive", field)));
            }
        }
        Ok(())
    }
}
