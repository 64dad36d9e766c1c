//! Response schemas passed to Gemini's structured output mode

use arise::ContentKind;
use serde_json::{json, Value};

/// Gemini `responseSchema` for a content kind
pub fn response_schema(kind: ContentKind) -> Value {
    let (properties, required) = match kind {
        ContentKind::Quests => (
            json!({
                "id": { "type": "STRING" },
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "reps": { "type": "STRING" },
                "sets": { "type": "STRING" },
                "instructions": { "type": "STRING" },
                "xpReward": { "type": "NUMBER" },
                "category": { "type": "STRING", "enum": ["STR", "AGI", "VIT"] }
            }),
            json!([
                "id", "title", "description", "reps", "sets", "instructions", "xpReward",
                "category"
            ]),
        ),
        ContentKind::Tips => (
            json!({
                "category": { "type": "STRING" },
                "content": { "type": "STRING" },
                "importance": { "type": "STRING", "enum": ["NORMAL", "HIGH", "CRITICAL"] }
            }),
            json!(["category", "content", "importance"]),
        ),
        ContentKind::Drills => (
            json!({
                "title": { "type": "STRING" },
                "description": { "type": "STRING" },
                "reps": { "type": "STRING" },
                "isPhysical": { "type": "BOOLEAN" }
            }),
            json!(["title", "description", "reps", "isPhysical"]),
        ),
    };

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": required
        }
    })
}
