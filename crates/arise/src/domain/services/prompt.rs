//! Prompt - Natural-language requests for the content generator

use crate::domain::entities::{ContentContext, Profile};

/// Number of items requested per batch
pub const ITEMS_PER_BATCH: usize = 4;

/// Build the generator prompt for `context`
pub fn build_prompt(profile: &Profile, context: &ContentContext) -> String {
    let hunter = profile.descriptor();
    match context {
        ContentContext::Quests {
            location,
            difficulty,
        } => format!(
            "You are the System that governs hunters. Analyze this hunter: {hunter}.\n\
             Training location: {location} ({equipment}).\n\
             Difficulty: {difficulty} ({intensity}).\n\
             Generate exactly {count} daily quests made of real exercises that fit the location.\n\
             Speak with absolute authority.\n\
             Return a pure JSON array. Each item has: id, title, description, reps, sets, \
             instructions, xpReward (number between 50 and 300, higher for harder quests), \
             category (one of STR, AGI, VIT).",
            equipment = location.equipment_hint(),
            intensity = difficulty.intensity_hint(),
            count = ITEMS_PER_BATCH,
        ),
        ContentContext::Tips { goal } => format!(
            "You are the System that governs hunters. Analyze this hunter: {hunter}.\n\
             Write {count} survival tips on nutrition, sleep and recovery \
             for the goal \"{goal}\".\n\
             Return a pure JSON array. Each item has: category, content, \
             importance (one of NORMAL, HIGH, CRITICAL).",
            count = ITEMS_PER_BATCH,
        ),
        ContentContext::Drills { style, level } => format!(
            "You are the sensei of the Shadow Dojo. The hunter ({hunter}) practices {style} \
             at dojo level {level}.\n\
             Generate {count} drills appropriate for that level, mixing physical drills with \
             technique study.\n\
             Return a pure JSON array. Each item has: title, description, reps, \
             isPhysical (boolean).",
            style = style.display_name(),
            count = ITEMS_PER_BATCH,
        ),
    }
}

/// Short greeting generated right after awakening
pub fn awakening_prompt(profile: &Profile) -> String {
    format!(
        "As the System, acknowledge the awakening of a new hunter: {:.0} kg, {:.0} cm, \
         goal \"{}\". Be brief and impactful, two sentences at most.",
        profile.weight_kg, profile.height_cm, profile.daily_goal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Onboarding;
    use crate::domain::value_objects::{Difficulty, MartialStyle, TrainingLocation};

    #[test]
    fn test_quest_prompt_mentions_context() {
        let profile = Profile::awaken(Onboarding::new("Jinwoo")).unwrap();
        let prompt = build_prompt(
            &profile,
            &ContentContext::Quests {
                location: TrainingLocation::Calisthenics,
                difficulty: Difficulty::Hell,
            },
        );

        assert!(prompt.contains("calisthenics"));
        assert!(prompt.contains("hell"));
        assert!(prompt.contains("xpReward"));
    }

    #[test]
    fn test_drill_prompt_mentions_style_and_level() {
        let profile = Profile::awaken(Onboarding::new("Jinwoo")).unwrap();
        let prompt = build_prompt(
            &profile,
            &ContentContext::Drills {
                style: MartialStyle::JiuJitsu,
                level: 7,
            },
        );

        assert!(prompt.contains("Jiu-Jitsu"));
        assert!(prompt.contains("level 7"));
    }
}
