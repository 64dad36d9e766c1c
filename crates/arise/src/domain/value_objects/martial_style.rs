//! MartialStyle - Secondary skill track practiced alongside hunter training

use serde::{Deserialize, Serialize};

use super::normalize_name;

/// Martial art style. `None` disables the secondary track.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum MartialStyle {
    #[default]
    None,
    Boxing,
    MuayThai,
    JiuJitsu,
    Karate,
    Mma,
    Capoeira,
}

impl MartialStyle {
    /// Every style, including `None`. Martial progress keeps one entry per element.
    pub const ALL: [MartialStyle; 7] = [
        MartialStyle::None,
        MartialStyle::Boxing,
        MartialStyle::MuayThai,
        MartialStyle::JiuJitsu,
        MartialStyle::Karate,
        MartialStyle::Mma,
        MartialStyle::Capoeira,
    ];

    pub fn is_none(&self) -> bool {
        matches!(self, MartialStyle::None)
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            MartialStyle::None => "None",
            MartialStyle::Boxing => "Boxing",
            MartialStyle::MuayThai => "Muay Thai",
            MartialStyle::JiuJitsu => "Jiu-Jitsu",
            MartialStyle::Karate => "Karate",
            MartialStyle::Mma => "MMA",
            MartialStyle::Capoeira => "Capoeira",
        }
    }
}

impl std::fmt::Display for MartialStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MartialStyle::None => write!(f, "none"),
            MartialStyle::Boxing => write!(f, "boxing"),
            MartialStyle::MuayThai => write!(f, "muay_thai"),
            MartialStyle::JiuJitsu => write!(f, "jiu_jitsu"),
            MartialStyle::Karate => write!(f, "karate"),
            MartialStyle::Mma => write!(f, "mma"),
            MartialStyle::Capoeira => write!(f, "capoeira"),
        }
    }
}

impl std::str::FromStr for MartialStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "none" | "" => Ok(MartialStyle::None),
            "boxing" => Ok(MartialStyle::Boxing),
            "muaythai" => Ok(MartialStyle::MuayThai),
            "jiujitsu" | "bjj" => Ok(MartialStyle::JiuJitsu),
            "karate" => Ok(MartialStyle::Karate),
            "mma" => Ok(MartialStyle::Mma),
            "capoeira" => Ok(MartialStyle::Capoeira),
            _ => Err(format!("Unknown martial style: {}", s)),
        }
    }
}
