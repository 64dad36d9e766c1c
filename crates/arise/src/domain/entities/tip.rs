//! Tip - Survival guidance generated for the hunter's goal

use serde::{Deserialize, Serialize};

/// How urgent a tip is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipImportance {
    #[default]
    Normal,
    High,
    Critical,
}

impl std::str::FromStr for TipImportance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "low" | "medium" => Ok(TipImportance::Normal),
            "high" | "alta" => Ok(TipImportance::High),
            "critical" | "crítica" | "critica" => Ok(TipImportance::Critical),
            _ => Err(format!("Unknown tip importance: {}", s)),
        }
    }
}

/// Health or nutrition tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub category: String,
    pub content: String,
    pub importance: TipImportance,
}
