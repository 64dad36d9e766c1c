//! Content - Kinds, contexts and lists of generated content

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Difficulty, MartialStyle, TrainingLocation};

use super::{ActivityItem, Drill, Tip};

/// Kind of generated content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Quests,
    Tips,
    Drills,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Quests => "quests",
            ContentKind::Tips => "tips",
            ContentKind::Drills => "drills",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Discriminators selecting which content applies.
///
/// Two equal contexts always share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentContext {
    Quests {
        location: TrainingLocation,
        difficulty: Difficulty,
    },
    Drills {
        style: MartialStyle,
        level: u32,
    },
    Tips {
        goal: String,
    },
}

impl ContentContext {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentContext::Quests { .. } => ContentKind::Quests,
            ContentContext::Drills { .. } => ContentKind::Drills,
            ContentContext::Tips { .. } => ContentKind::Tips,
        }
    }

    /// Stable cache key, e.g. `quests:gym:hard`
    pub fn cache_key(&self) -> String {
        match self {
            ContentContext::Quests {
                location,
                difficulty,
            } => format!("quests:{}:{}", location, difficulty),
            ContentContext::Drills { style, level } => format!("drills:{}:{}", style, level),
            ContentContext::Tips { goal } => {
                let goal: String = goal
                    .trim()
                    .to_lowercase()
                    .chars()
                    .map(|c| if c.is_alphanumeric() { c } else { '_' })
                    .collect();
                format!("tips:{}", goal)
            }
        }
    }
}

impl std::fmt::Display for ContentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cache_key())
    }
}

/// A typed list of generated content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ContentList {
    Quests(Vec<ActivityItem>),
    Tips(Vec<Tip>),
    Drills(Vec<Drill>),
}

impl ContentList {
    /// Empty list of the given kind
    pub fn empty(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Quests => ContentList::Quests(Vec::new()),
            ContentKind::Tips => ContentList::Tips(Vec::new()),
            ContentKind::Drills => ContentList::Drills(Vec::new()),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentList::Quests(_) => ContentKind::Quests,
            ContentList::Tips(_) => ContentKind::Tips,
            ContentList::Drills(_) => ContentKind::Drills,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ContentList::Quests(items) => items.len(),
            ContentList::Tips(items) => items.len(),
            ContentList::Drills(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_quests(self) -> Vec<ActivityItem> {
        match self {
            ContentList::Quests(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn into_tips(self) -> Vec<Tip> {
        match self {
            ContentList::Tips(items) => items,
            _ => Vec::new(),
        }
    }

    pub fn into_drills(self) -> Vec<Drill> {
        match self {
            ContentList::Drills(items) => items,
            _ => Vec::new(),
        }
    }
}
