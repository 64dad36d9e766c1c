//! Fallback quests, served when no generator credentials are configured

use crate::domain::entities::ActivityItem;
use crate::domain::value_objects::{StatCategory, TrainingLocation};

/// Number of fallback quests handed out per batch
pub const FALLBACK_BATCH: usize = 4;

const FALLBACK_QUESTS: [(&str, &str, &str, &str, &str, &str, f64, StatCategory); 6] = [
    (
        "fb-1",
        "Push-ups",
        "Basic upper body strength training.",
        "20",
        "4",
        "Keep the core rigid and elbows at 45 degrees. Lower slowly, explode up.",
        150.0,
        StatCategory::Strength,
    ),
    (
        "fb-2",
        "Squats",
        "Builds the base and leg drive.",
        "30",
        "3",
        "Back straight, weight on the heels. Sit on an invisible throne.",
        100.0,
        StatCategory::Vitality,
    ),
    (
        "fb-3",
        "Leg Raises",
        "E-rank core stability.",
        "25",
        "4",
        "Lying down, raise straight legs to 90 degrees and lower without touching the floor.",
        120.0,
        StatCategory::Vitality,
    ),
    (
        "fb-4",
        "Combat Burpees",
        "Agility and intense cardio.",
        "12",
        "3",
        "Drop to a plank, do a push-up, jump back up and clap overhead.",
        200.0,
        StatCategory::Agility,
    ),
    (
        "fb-5",
        "Plank Hold",
        "Hunter endurance.",
        "60 seconds",
        "3",
        "Forearms and toes on the floor. Keep the body in one straight line.",
        150.0,
        StatCategory::Vitality,
    ),
    (
        "fb-6",
        "Jumping Jacks",
        "Agility warm-up.",
        "50",
        "3",
        "Keep a steady rhythm and controlled breathing. Coordinate arms and legs.",
        80.0,
        StatCategory::Agility,
    ),
];

/// The built-in quest batch for `location`
pub fn fallback_quests(location: TrainingLocation) -> Vec<ActivityItem> {
    FALLBACK_QUESTS
        .iter()
        .take(FALLBACK_BATCH)
        .map(
            |(id, title, description, reps, sets, instructions, xp_reward, category)| {
                ActivityItem {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    reps: reps.to_string(),
                    sets: sets.to_string(),
                    instructions: instructions.to_string(),
                    xp_reward: *xp_reward,
                    category: *category,
                    completed: false,
                    location,
                }
            },
        )
        .collect()
}
