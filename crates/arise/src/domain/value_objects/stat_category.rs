//! StatCategory - Which stat a completed activity trains

use serde::{Deserialize, Serialize};

use super::normalize_name;

/// Activity category, maps one-to-one onto a trainable stat
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StatCategory {
    #[serde(rename = "STR", alias = "strength", alias = "Strength")]
    Strength,
    #[serde(rename = "AGI", alias = "agility", alias = "Agility")]
    Agility,
    #[serde(rename = "VIT", alias = "vitality", alias = "Vitality")]
    Vitality,
}

impl std::fmt::Display for StatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatCategory::Strength => write!(f, "STR"),
            StatCategory::Agility => write!(f, "AGI"),
            StatCategory::Vitality => write!(f, "VIT"),
        }
    }
}

impl std::str::FromStr for StatCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "str" | "strength" => Ok(StatCategory::Strength),
            "agi" | "agility" => Ok(StatCategory::Agility),
            "vit" | "vitality" => Ok(StatCategory::Vitality),
            _ => Err(format!("Unknown stat category: {}", s)),
        }
    }
}
