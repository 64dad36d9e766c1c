//! Content Parser - Validates raw generator output into typed content
//!
//! The generator is untrusted: every element is checked against the schema
//! of the requested kind before anything reaches the cache or the session.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::{
    ActivityItem, ContentContext, ContentList, Drill, Tip, TipImportance,
};
use crate::domain::errors::ParseError;
use crate::domain::value_objects::{StatCategory, TrainingLocation};

use super::MAX_GAIN;

/// Parse generator text for `context` into a typed, stamped content list
pub fn parse_content(context: &ContentContext, raw: &str) -> Result<ContentList, ParseError> {
    let body = strip_code_fence(raw);
    if body.is_empty() {
        return Err(ParseError::Empty);
    }

    let value: Value =
        serde_json::from_str(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => return Err(ParseError::NotAnArray(json_type(&other))),
    };

    match context {
        ContentContext::Quests { location, .. } => {
            parse_quests(elements, *location).map(ContentList::Quests)
        }
        ContentContext::Tips { .. } => parse_tips(elements).map(ContentList::Tips),
        ContentContext::Drills { .. } => parse_drills(elements).map(ContentList::Drills),
    }
}

// ============================================
// Raw Schemas
// ============================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuest {
    #[serde(default)]
    id: Option<Value>,
    title: String,
    description: String,
    reps: Value,
    sets: Value,
    instructions: String,
    xp_reward: f64,
    #[serde(alias = "type")]
    category: String,
}

#[derive(Deserialize)]
struct RawTip {
    category: String,
    content: String,
    #[serde(default)]
    importance: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDrill {
    title: String,
    description: String,
    reps: Value,
    is_physical: bool,
}

fn parse_quests(
    elements: Vec<Value>,
    location: TrainingLocation,
) -> Result<Vec<ActivityItem>, ParseError> {
    let mut seen = HashSet::new();
    let mut quests = Vec::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        let raw: RawQuest = from_element("quest", index, element)?;

        if !raw.xp_reward.is_finite() || raw.xp_reward <= 0.0 || raw.xp_reward > MAX_GAIN {
            return Err(schema_error(
                "quest",
                index,
                format!("xpReward must be in (0, {MAX_GAIN}], got {}", raw.xp_reward),
            ));
        }
        let category: StatCategory = raw
            .category
            .parse()
            .map_err(|e: String| schema_error("quest", index, e))?;

        let mut id = raw
            .id
            .as_ref()
            .and_then(scalar_text)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("q-{}", index + 1));
        if !seen.insert(id.clone()) {
            debug!(id = %id, index, "Duplicate quest id");
            let mut suffix = index + 1;
            id = loop {
                let candidate = format!("{id}-{suffix}");
                if seen.insert(candidate.clone()) {
                    break candidate;
                }
                suffix += 1;
            };
        }

        quests.push(ActivityItem {
            id,
            title: raw.title,
            description: raw.description,
            reps: scalar_text(&raw.reps).unwrap_or_default(),
            sets: scalar_text(&raw.sets).unwrap_or_default(),
            instructions: raw.instructions,
            xp_reward: raw.xp_reward,
            category,
            completed: false,
            location,
        });
    }

    Ok(quests)
}

fn parse_tips(elements: Vec<Value>) -> Result<Vec<Tip>, ParseError> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let raw: RawTip = from_element("tip", index, element)?;
            let importance = raw
                .importance
                .and_then(|s| s.parse::<TipImportance>().ok())
                .unwrap_or_default();
            Ok(Tip {
                category: raw.category,
                content: raw.content,
                importance,
            })
        })
        .collect()
}

fn parse_drills(elements: Vec<Value>) -> Result<Vec<Drill>, ParseError> {
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let raw: RawDrill = from_element("drill", index, element)?;
            Ok(Drill {
                title: raw.title,
                description: raw.description,
                reps: scalar_text(&raw.reps).unwrap_or_default(),
                is_physical: raw.is_physical,
            })
        })
        .collect()
}

// ============================================
// Helper Functions
// ============================================

fn from_element<T: for<'de> Deserialize<'de>>(
    kind: &'static str,
    index: usize,
    element: Value,
) -> Result<T, ParseError> {
    serde_json::from_value(element).map_err(|e| schema_error(kind, index, e.to_string()))
}

fn schema_error(kind: &'static str, index: usize, reason: String) -> ParseError {
    ParseError::Schema {
        kind,
        index,
        reason,
    }
}

/// Models often wrap JSON in a Markdown fence
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

/// Text of a string or number, free-form fields like reps accept both
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
