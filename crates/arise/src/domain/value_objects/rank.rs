//! Rank - Coarse hunter tier derived from progression

use serde::{Deserialize, Serialize};

use super::normalize_name;

/// Hunter rank, ordered from weakest (E) to strongest (S)
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Rank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
}

/// Level breakpoints, highest first
const LEVEL_BREAKPOINTS: [(u32, Rank); 5] = [
    (100, Rank::S),
    (80, Rank::A),
    (50, Rank::B),
    (30, Rank::C),
    (10, Rank::D),
];

/// Combat power (sum of all stats) breakpoints, highest first
const COMBAT_POWER_BREAKPOINTS: [(f64, Rank); 5] = [
    (500.0, Rank::S),
    (400.0, Rank::A),
    (300.0, Rank::B),
    (200.0, Rank::C),
    (100.0, Rank::D),
];

impl Rank {
    /// Rank for a hunter level
    pub fn for_level(level: u32) -> Self {
        LEVEL_BREAKPOINTS
            .iter()
            .find(|(min, _)| level >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::E)
    }

    /// Rank for a combat power value
    pub fn for_combat_power(power: f64) -> Self {
        COMBAT_POWER_BREAKPOINTS
            .iter()
            .find(|(min, _)| power >= *min)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::E)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        };
        write!(f, "{}", letter)
    }
}

/// How rank is derived from a profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RankStrategy {
    /// Fixed level breakpoints (10/30/50/80/100)
    #[default]
    Level,
    /// Sum of the five stats against fixed power breakpoints
    CombatPower,
}

impl std::fmt::Display for RankStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankStrategy::Level => write!(f, "level"),
            RankStrategy::CombatPower => write!(f, "combat_power"),
        }
    }
}

impl std::str::FromStr for RankStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "level" => Ok(RankStrategy::Level),
            "combatpower" | "power" => Ok(RankStrategy::CombatPower),
            _ => Err(format!("Unknown rank strategy: {}", s)),
        }
    }
}
