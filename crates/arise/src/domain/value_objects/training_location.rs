//! TrainingLocation - Where the hunter trains, selects the quest context

use serde::{Deserialize, Serialize};

use super::normalize_name;

/// Training location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLocation {
    #[default]
    Home,
    Calisthenics,
    Gym,
}

impl TrainingLocation {
    pub const ALL: [TrainingLocation; 3] = [
        TrainingLocation::Home,
        TrainingLocation::Calisthenics,
        TrainingLocation::Gym,
    ];

    /// Equipment constraints handed to the content generator
    pub fn equipment_hint(&self) -> &'static str {
        match self {
            TrainingLocation::Home => "bodyweight only, no equipment, small indoor space",
            TrainingLocation::Calisthenics => "pull-up bar, parallel bars and open outdoor space",
            TrainingLocation::Gym => "full gym with free weights, machines and cables",
        }
    }
}

impl std::fmt::Display for TrainingLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainingLocation::Home => write!(f, "home"),
            TrainingLocation::Calisthenics => write!(f, "calisthenics"),
            TrainingLocation::Gym => write!(f, "gym"),
        }
    }
}

impl std::str::FromStr for TrainingLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "home" => Ok(TrainingLocation::Home),
            "calisthenics" | "park" => Ok(TrainingLocation::Calisthenics),
            "gym" => Ok(TrainingLocation::Gym),
            _ => Err(format!("Unknown training location: {}", s)),
        }
    }
}
