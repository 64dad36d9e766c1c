//! Difficulty - Training intensity chosen by the hunter

use serde::{Deserialize, Serialize};

use super::normalize_name;

/// Training difficulty
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Hell,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Hell,
    ];

    /// How the difficulty is described to the content generator
    pub fn intensity_hint(&self) -> &'static str {
        match self {
            Difficulty::Easy => "beginner friendly, low volume, long rests",
            Difficulty::Normal => "moderate volume for a regularly active adult",
            Difficulty::Hard => "high volume, short rests, demanding progressions",
            Difficulty::Hell => "brutal volume at the edge of the hunter's capacity",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Hell => write!(f, "hell"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "hell" | "infernal" => Ok(Difficulty::Hell),
            _ => Err(format!("Unknown difficulty: {}", s)),
        }
    }
}
