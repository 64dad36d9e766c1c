//! Progression Engine - Experience accrual and level-up rules
//!
//! Applies one experience gain to a profile:
//! 1. hunter XP with multi-level carry-over
//! 2. rank derivation
//! 3. martial XP for the active style
//! 4. stat growth for the activity category
//!
//! Persistence is the caller's job. The engine has no duplicate guard;
//! completion idempotence lives in the quest lifecycle.
//!
//! A single gain is clamped to `MAX_GAIN` and levels stop at `MAX_LEVEL`,
//! so both accrual loops always terminate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{GainOutcome, LevelUp, Profile, MAX_LEVEL};
use crate::domain::value_objects::{Rank, RankStrategy, StatCategory};

/// Stat increase per completed activity
pub const STAT_GAIN: f64 = 0.5;

/// Largest experience amount a single gain may carry
pub const MAX_GAIN: f64 = 100_000.0;

/// Tunable progression options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// How rank is derived
    pub rank_strategy: RankStrategy,
    /// Growth of the stat matching the activity category
    pub stat_gain: f64,
    /// When set, intelligence and sense grow by this amount on every gain
    pub mental_trickle: Option<f64>,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            rank_strategy: RankStrategy::Level,
            stat_gain: STAT_GAIN,
            mental_trickle: None,
        }
    }
}

/// Rule-based progression engine
#[derive(Debug, Clone, Default)]
pub struct ProgressionEngine {
    config: ProgressionConfig,
}

impl ProgressionEngine {
    pub fn new(config: ProgressionConfig) -> Self {
        Self { config }
    }

    /// Rank the profile should hold under the configured strategy
    pub fn derive_rank(&self, profile: &Profile) -> Rank {
        match self.config.rank_strategy {
            RankStrategy::Level => Rank::for_level(profile.level),
            RankStrategy::CombatPower => Rank::for_combat_power(profile.stats.combat_power()),
        }
    }

    /// Apply `amount` XP earned from an activity of `category`.
    ///
    /// `amount` is clamped to `0..=MAX_GAIN`; non-finite amounts count as zero.
    pub fn apply(&self, profile: &mut Profile, amount: f64, category: StatCategory) -> GainOutcome {
        let amount = if amount.is_finite() {
            amount.clamp(0.0, MAX_GAIN)
        } else {
            0.0
        };

        let previous_rank = profile.rank;
        let mut level_ups = Vec::new();

        // Hunter track; the threshold grows with each level crossed
        profile.xp += amount;
        while profile.xp >= profile.threshold() {
            let Some(next) = next_level(profile.level) else {
                profile.xp = 0.0;
                break;
            };
            profile.xp -= profile.threshold();
            profile.level = next;
            debug!(level = profile.level, "Hunter level up");
            level_ups.push(LevelUp::hunter(profile.level));
        }

        if !level_ups.is_empty() && self.config.rank_strategy == RankStrategy::Level {
            profile.rank = self.derive_rank(profile);
        }

        // Martial track for the active style only
        if !profile.martial_style.is_none() {
            let style = profile.martial_style;
            let progress = profile.martial_progress.entry(style).or_default();
            progress.xp += amount;
            while progress.xp >= progress.threshold() {
                let Some(next) = next_level(progress.level) else {
                    progress.xp = 0.0;
                    break;
                };
                progress.xp -= progress.threshold();
                progress.level = next;
                debug!(%style, level = progress.level, "Martial level up");
                level_ups.push(LevelUp::martial(style, progress.level));
            }
        }

        let gain = self.config.stat_gain;
        match category {
            StatCategory::Strength => profile.stats.strength += gain,
            StatCategory::Agility => profile.stats.agility += gain,
            StatCategory::Vitality => profile.stats.vitality += gain,
        }

        if let Some(trickle) = self.config.mental_trickle {
            profile.stats.intelligence += trickle;
            profile.stats.sense += trickle;
        }

        if self.config.rank_strategy == RankStrategy::CombatPower {
            profile.rank = self.derive_rank(profile);
        }

        GainOutcome {
            amount,
            category,
            level_ups,
            previous_rank,
            rank: profile.rank,
        }
    }
}

/// Level after `level`, `None` once the cap is reached
fn next_level(level: u32) -> Option<u32> {
    level.checked_add(1).filter(|next| *next <= MAX_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{MartialProgress, Onboarding, Track};
    use crate::domain::value_objects::MartialStyle;

    fn fresh(style: MartialStyle) -> Profile {
        Profile::awaken(Onboarding::new("Jinwoo").with_martial_style(style)).unwrap()
    }

    fn hunter_level_ups(outcome: &GainOutcome) -> usize {
        outcome
            .level_ups
            .iter()
            .filter(|e| e.track == Track::Hunter)
            .count()
    }

    #[test]
    fn test_worked_example_250_xp() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);

        let outcome = engine.apply(&mut profile, 250.0, StatCategory::Strength);

        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 150.0);
        assert_eq!(outcome.level_ups, vec![LevelUp::hunter(2)]);
        assert_eq!(profile.stats.strength, 10.5);
        assert_eq!(profile.stats.agility, 10.0);
    }

    #[test]
    fn test_exact_threshold_levels_once_with_zero_carry() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);
        profile.level = 4;
        profile.xp = 130.0;

        let needed = profile.threshold() - profile.xp;
        let outcome = engine.apply(&mut profile, needed, StatCategory::Agility);

        assert_eq!(hunter_level_ups(&outcome), 1);
        assert_eq!(profile.level, 5);
        assert_eq!(profile.xp, 0.0);
    }

    #[test]
    fn test_large_gain_loops_through_several_levels() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);

        // 100 (1 -> 2) + 200 (2 -> 3)
        let outcome = engine.apply(&mut profile, 300.0, StatCategory::Vitality);

        assert_eq!(
            outcome.level_ups,
            vec![LevelUp::hunter(2), LevelUp::hunter(3)]
        );
        assert_eq!(profile.level, 3);
        assert_eq!(profile.xp, 0.0);
    }

    #[test]
    fn test_double_threshold_from_fresh_level() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);

        // 200 clears level 1 but not level 2's 200 threshold
        let outcome = engine.apply(&mut profile, 200.0, StatCategory::Strength);

        assert_eq!(hunter_level_ups(&outcome), 1);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.xp, 100.0);
    }

    #[test]
    fn test_xp_stays_below_threshold_for_many_amounts() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::Boxing);

        for amount in [0.0, 0.5, 12.25, 99.99, 100.0, 150.0, 1234.5, 4000.0, 77.0] {
            engine.apply(&mut profile, amount, StatCategory::Strength);
            assert!(profile.xp >= 0.0);
            assert!(profile.xp < profile.threshold());
            let progress = profile.martial_progress[&MartialStyle::Boxing];
            assert!(progress.xp >= 0.0 && progress.xp < progress.threshold());
        }
    }

    #[test]
    fn test_zero_amount_changes_only_stats() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);

        let outcome = engine.apply(&mut profile, 0.0, StatCategory::Agility);

        assert!(!outcome.leveled_up());
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp, 0.0);
        assert_eq!(profile.stats.agility, 10.5);
    }

    #[test]
    fn test_rank_follows_level() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);
        profile.level = 9;
        profile.xp = 850.0;

        let outcome = engine.apply(&mut profile, 100.0, StatCategory::Strength);

        assert_eq!(profile.level, 10);
        assert_eq!(profile.rank, Rank::D);
        assert!(outcome.rank_changed());
    }

    #[test]
    fn test_martial_track_uses_smaller_threshold() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::Karate);

        let outcome = engine.apply(&mut profile, 90.0, StatCategory::Strength);

        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp, 90.0);
        assert_eq!(
            outcome.level_ups,
            vec![LevelUp::martial(MartialStyle::Karate, 2)]
        );
        assert_eq!(
            profile.martial_progress[&MartialStyle::Karate],
            MartialProgress { level: 2, xp: 10.0 }
        );
    }

    #[test]
    fn test_hunter_events_precede_martial_events() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::Boxing);

        // Hunter: 1 -> 2 (100), 2 -> 3 (200). Martial: 1 -> 2 (80), 2 -> 3 (160).
        let outcome = engine.apply(&mut profile, 300.0, StatCategory::Strength);

        assert_eq!(
            outcome.level_ups,
            vec![
                LevelUp::hunter(2),
                LevelUp::hunter(3),
                LevelUp::martial(MartialStyle::Boxing, 2),
                LevelUp::martial(MartialStyle::Boxing, 3),
            ]
        );
        assert_eq!(profile.martial_progress[&MartialStyle::Boxing].xp, 60.0);
    }

    #[test]
    fn test_other_styles_untouched() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::MuayThai);
        profile
            .martial_progress
            .insert(MartialStyle::Capoeira, MartialProgress { level: 4, xp: 12.0 });

        engine.apply(&mut profile, 500.0, StatCategory::Agility);

        assert_eq!(
            profile.martial_progress[&MartialStyle::Capoeira],
            MartialProgress { level: 4, xp: 12.0 }
        );
        assert_eq!(
            profile.martial_progress[&MartialStyle::None],
            MartialProgress::default()
        );
    }

    #[test]
    fn test_no_style_no_martial_gain() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);

        engine.apply(&mut profile, 500.0, StatCategory::Strength);

        assert!(profile
            .martial_progress
            .values()
            .all(|p| *p == MartialProgress::default()));
    }

    #[test]
    fn test_mental_trickle_is_opt_in() {
        let mut profile = fresh(MartialStyle::None);
        ProgressionEngine::default().apply(&mut profile, 10.0, StatCategory::Strength);
        assert_eq!(profile.stats.intelligence, 10.0);
        assert_eq!(profile.stats.sense, 10.0);

        let engine = ProgressionEngine::new(ProgressionConfig {
            mental_trickle: Some(0.25),
            ..ProgressionConfig::default()
        });
        engine.apply(&mut profile, 10.0, StatCategory::Strength);
        assert_eq!(profile.stats.intelligence, 10.25);
        assert_eq!(profile.stats.sense, 10.25);
    }

    #[test]
    fn test_combat_power_strategy() {
        let engine = ProgressionEngine::new(ProgressionConfig {
            rank_strategy: RankStrategy::CombatPower,
            ..ProgressionConfig::default()
        });
        let mut profile = fresh(MartialStyle::None);
        profile.stats.strength = 49.5;

        // Power 89.5 -> 90 after the gain: still E
        engine.apply(&mut profile, 10.0, StatCategory::Strength);
        assert_eq!(profile.rank, Rank::E);

        profile.stats.vitality = 19.5;
        // Power 99.5 -> 100
        let outcome = engine.apply(&mut profile, 0.0, StatCategory::Vitality);
        assert_eq!(profile.rank, Rank::D);
        assert!(outcome.rank_changed());
    }

    #[test]
    fn test_huge_gain_is_clamped_and_terminates() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::Boxing);

        let outcome = engine.apply(&mut profile, 1e300, StatCategory::Strength);

        // 100 * (1 + ... + 44) = 99_000 leaves 1_000 carried at level 45
        assert_eq!(outcome.amount, MAX_GAIN);
        assert_eq!(profile.level, 45);
        assert_eq!(profile.xp, 1_000.0);
        assert!(profile.xp < profile.threshold());

        let boxing = profile.martial_progress[&MartialStyle::Boxing];
        assert!(boxing.xp < boxing.threshold());
    }

    #[test]
    fn test_level_cap_stops_both_tracks() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::Karate);
        profile.level = MAX_LEVEL;
        profile.xp = profile.threshold() - 1.0;
        profile.martial_progress.insert(
            MartialStyle::Karate,
            MartialProgress {
                level: MAX_LEVEL,
                xp: f64::from(MAX_LEVEL) * 80.0 - 1.0,
            },
        );

        let outcome = engine.apply(&mut profile, 10.0, StatCategory::Agility);

        assert!(outcome.level_ups.is_empty());
        assert_eq!(profile.level, MAX_LEVEL);
        assert_eq!(profile.xp, 0.0);
        let karate = profile.martial_progress[&MartialStyle::Karate];
        assert_eq!(karate.level, MAX_LEVEL);
        assert_eq!(karate.xp, 0.0);
    }

    #[test]
    fn test_out_of_range_level_does_not_overflow() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);
        profile.level = u32::MAX - 1;
        profile.xp = profile.threshold();

        let outcome = engine.apply(&mut profile, 1e12, StatCategory::Vitality);

        assert!(outcome.level_ups.is_empty());
        assert_eq!(profile.level, u32::MAX - 1);
        assert_eq!(profile.xp, 0.0);
    }

    #[test]
    fn test_non_finite_amount_counts_as_zero() {
        let engine = ProgressionEngine::default();
        let mut profile = fresh(MartialStyle::None);

        let outcome = engine.apply(&mut profile, f64::NAN, StatCategory::Strength);

        assert_eq!(outcome.amount, 0.0);
        assert_eq!(profile.xp, 0.0);
    }
}
