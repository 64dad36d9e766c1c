//! Hunter Session (Use Case)
//!
//! Owns the live profile and the active content lists. Every mutation is
//! applied to a copy, persisted, and only then committed in memory.
//!
//! Refreshes hold `&mut self` across the fetch, so no setter can change the
//! context while a response is outstanding; each list is stored together
//! with the context it was requested for.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use arise::{
    ActivityItem, ContentCache, ContentContext, ContentGenerator, ContentList, Difficulty,
    DomainError, Drill, GainOutcome, MartialStyle, Onboarding, Profile, ProfileRepository,
    ProgressionEngine, StatCategory, Tip, TrainingLocation,
};

use arise::domain::MAX_GAIN;

use super::ContentGateway;

/// An awakened hunter's working session
pub struct Session<R, C, G>
where
    R: ProfileRepository,
    C: ContentCache,
    G: ContentGenerator,
{
    profile: Profile,
    repository: Arc<R>,
    cache: Arc<C>,
    gateway: ContentGateway<G>,
    engine: ProgressionEngine,
    quests: Vec<ActivityItem>,
    quest_context: Option<ContentContext>,
    tips: Vec<Tip>,
    tips_context: Option<ContentContext>,
    drills: Vec<Drill>,
    drill_context: Option<ContentContext>,
}

impl<R, C, G> Session<R, C, G>
where
    R: ProfileRepository,
    C: ContentCache,
    G: ContentGenerator,
{
    pub fn new(
        profile: Profile,
        repository: Arc<R>,
        cache: Arc<C>,
        gateway: ContentGateway<G>,
        engine: ProgressionEngine,
    ) -> Self {
        Self {
            profile,
            repository,
            cache,
            gateway,
            engine,
            quests: Vec::new(),
            quest_context: None,
            tips: Vec::new(),
            tips_context: None,
            drills: Vec::new(),
            drill_context: None,
        }
    }

    /// Resume from the stored profile, `None` when no hunter has awakened yet
    pub async fn resume(
        repository: Arc<R>,
        cache: Arc<C>,
        gateway: ContentGateway<G>,
        engine: ProgressionEngine,
    ) -> Option<Self> {
        let profile = repository.load().await?;
        debug!(name = %profile.name, level = profile.level, "Resumed profile");
        Some(Self::new(profile, repository, cache, gateway, engine))
    }

    /// Create and persist a level 1 hunter
    pub async fn awaken(
        onboarding: Onboarding,
        repository: Arc<R>,
        cache: Arc<C>,
        gateway: ContentGateway<G>,
        engine: ProgressionEngine,
    ) -> Result<Self, DomainError> {
        let profile = Profile::awaken(onboarding)?;
        repository.save(&profile).await?;
        info!(name = %profile.name, "Hunter awakened");
        Ok(Self::new(profile, repository, cache, gateway, engine))
    }

    // ============================================
    // Accessors
    // ============================================

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn quests(&self) -> &[ActivityItem] {
        &self.quests
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }

    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    /// Context the active quest list was produced for
    pub fn quest_context(&self) -> Option<&ContentContext> {
        self.quest_context.as_ref()
    }

    pub fn tips_context(&self) -> Option<&ContentContext> {
        self.tips_context.as_ref()
    }

    pub fn drill_context(&self) -> Option<&ContentContext> {
        self.drill_context.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.gateway.is_live()
    }

    /// Quest context implied by the current profile
    pub fn current_quest_context(&self) -> ContentContext {
        ContentContext::Quests {
            location: self.profile.preferred_location.unwrap_or_default(),
            difficulty: self.profile.difficulty,
        }
    }

    pub fn current_tips_context(&self) -> ContentContext {
        ContentContext::Tips {
            goal: self.profile.daily_goal.clone(),
        }
    }

    /// Drill context for the active style, `None` when no style is practiced
    pub fn current_drill_context(&self) -> Option<ContentContext> {
        let progress = self.profile.active_martial_progress()?;
        Some(ContentContext::Drills {
            style: self.profile.martial_style,
            level: progress.level,
        })
    }

    // ============================================
    // Progression
    // ============================================

    /// Complete an active quest by id.
    ///
    /// Unknown or already completed ids are ignored and return `Ok(None)`.
    pub async fn complete_item(&mut self, id: &str) -> Result<Option<GainOutcome>, DomainError> {
        let Some(index) = self.quests.iter().position(|q| q.id == id) else {
            debug!(id, "Ignoring completion of unknown quest");
            return Ok(None);
        };
        if self.quests[index].completed {
            debug!(id, "Quest already completed");
            return Ok(None);
        }

        let quest = &self.quests[index];
        let (amount, category) = (quest.xp_reward, quest.category);

        let mut next = self.profile.clone();
        let outcome = self.engine.apply(&mut next, amount, category);
        self.commit(next).await?;
        self.quests[index].completed = true;

        info!(id, xp = amount, level = self.profile.level, "Quest completed");
        Ok(Some(outcome))
    }

    /// Log experience earned outside of a generated quest
    pub async fn gain_experience(
        &mut self,
        amount: f64,
        category: StatCategory,
    ) -> Result<GainOutcome, DomainError> {
        if !(0.0..=MAX_GAIN).contains(&amount) {
            return Err(DomainError::Validation(format!(
                "experience must be between 0 and {MAX_GAIN}, got {amount}"
            )));
        }

        let mut next = self.profile.clone();
        let outcome = self.engine.apply(&mut next, amount, category);
        self.commit(next).await?;

        info!(xp = amount, %category, level = self.profile.level, "Experience gained");
        Ok(outcome)
    }

    // ============================================
    // Content
    // ============================================

    pub async fn refresh_quests(&mut self, force: bool) -> &[ActivityItem] {
        let context = self.current_quest_context();
        let content = self.obtain(&context, force).await;

        self.quests = content.into_quests();
        self.quest_context = Some(context);
        &self.quests
    }

    pub async fn refresh_tips(&mut self, force: bool) -> &[Tip] {
        let context = self.current_tips_context();
        let content = self.obtain(&context, force).await;

        self.tips = content.into_tips();
        self.tips_context = Some(context);
        &self.tips
    }

    /// Refresh drills for the active style; clears them when no style is practiced
    pub async fn refresh_drills(&mut self, force: bool) -> &[Drill] {
        let Some(context) = self.current_drill_context() else {
            self.drills.clear();
            self.drill_context = None;
            return &self.drills;
        };
        let content = self.obtain(&context, force).await;

        self.drills = content.into_drills();
        self.drill_context = Some(context);
        &self.drills
    }

    pub async fn awakening_message(&self) -> String {
        self.gateway.awakening_message(&self.profile).await
    }

    // ============================================
    // Settings
    // ============================================

    pub async fn set_location(&mut self, location: TrainingLocation) -> Result<(), DomainError> {
        let mut next = self.profile.clone();
        next.preferred_location = Some(location);
        self.commit(next).await?;

        if self.quest_context.as_ref() != Some(&self.current_quest_context()) {
            self.quests.clear();
            self.quest_context = None;
        }
        info!(%location, "Training location changed");
        Ok(())
    }

    /// Change difficulty; active quests are dropped and the cached batch for
    /// the new context is invalidated so the next refresh regenerates it.
    pub async fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), DomainError> {
        let mut next = self.profile.clone();
        next.difficulty = difficulty;
        self.commit(next).await?;

        self.quests.clear();
        self.quest_context = None;
        let context = self.current_quest_context();
        if let Err(e) = self.cache.invalidate(&context).await {
            warn!(context = %context, error = %e, "Failed to invalidate cached quests");
        }
        info!(%difficulty, "Difficulty changed");
        Ok(())
    }

    /// Switch martial style; progress of every style is kept
    pub async fn set_martial_style(&mut self, style: MartialStyle) -> Result<(), DomainError> {
        let mut next = self.profile.clone();
        next.martial_style = style;
        next.repair_martial_progress();
        self.commit(next).await?;

        self.drills.clear();
        self.drill_context = None;
        info!(%style, "Martial style changed");
        Ok(())
    }

    pub async fn set_goal(&mut self, goal: &str) -> Result<(), DomainError> {
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(DomainError::Validation("daily goal cannot be empty".to_string()));
        }

        let mut next = self.profile.clone();
        next.daily_goal = goal.to_string();
        self.commit(next).await?;

        self.tips.clear();
        self.tips_context = None;
        info!(goal, "Daily goal changed");
        Ok(())
    }

    // ============================================
    // Helpers
    // ============================================

    /// Persist `next` and adopt it; on failure the session is left untouched
    async fn commit(&mut self, mut next: Profile) -> Result<(), DomainError> {
        next.updated_at = Utc::now();
        self.repository.save(&next).await?;
        self.profile = next;
        Ok(())
    }

    /// Cached content for `context`, or a fresh fetch when missing or forced.
    ///
    /// Only non-empty live results are cached.
    async fn obtain(&self, context: &ContentContext, force: bool) -> ContentList {
        if !force {
            if let Some(hit) = self.cache.get(context).await {
                debug!(context = %context, items = hit.len(), "Content cache hit");
                return hit;
            }
        }

        let content = self.gateway.fetch(&self.profile, context).await;
        if self.gateway.is_live() && !content.is_empty() {
            if let Err(e) = self.cache.put(context, &content).await {
                warn!(context = %context, error = %e, "Failed to cache content");
            }
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        profile, profile_with_style, quests_json, Harness, MemoryProfileRepository,
    };
    use arise::{ContentKind, GenerationError, Rank, Track};

    fn tips_json() -> String {
        r#"[{"category": "Recovery", "content": "Sleep eight hours", "importance": "HIGH"}]"#
            .to_string()
    }

    #[tokio::test]
    async fn test_resume_without_profile() {
        let harness = Harness::new(Vec::new());
        let session = Session::resume(
            harness.repo.clone(),
            harness.cache.clone(),
            ContentGateway::new(harness.generator.clone(), Default::default()),
            ProgressionEngine::default(),
        )
        .await;

        assert!(session.is_none());
    }

    #[tokio::test]
    async fn test_awaken_persists_profile() {
        let harness = Harness::new(Vec::new());
        let session = Session::awaken(
            Onboarding::new("Jinwoo"),
            harness.repo.clone(),
            harness.cache.clone(),
            ContentGateway::new(harness.generator.clone(), Default::default()),
            ProgressionEngine::default(),
        )
        .await
        .unwrap();

        assert_eq!(session.profile().level, 1);
        assert_eq!(harness.repo.stored().unwrap().name, "Jinwoo");
    }

    #[tokio::test]
    async fn test_awaken_rejects_blank_name() {
        let harness = Harness::new(Vec::new());
        let result = Session::awaken(
            Onboarding::new("   "),
            harness.repo.clone(),
            harness.cache.clone(),
            ContentGateway::new(harness.generator.clone(), Default::default()),
            ProgressionEngine::default(),
        )
        .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(harness.repo.stored().is_none());
    }

    #[tokio::test]
    async fn test_complete_item_awards_once() {
        let harness = Harness::new(vec![Ok(quests_json(&["a", "b"]))]);
        let mut session = harness.session(profile());
        session.refresh_quests(false).await;

        let outcome = session.complete_item("a").await.unwrap().unwrap();
        assert_eq!(outcome.amount, 150.0);
        assert_eq!(outcome.level_ups.len(), 1);
        assert_eq!(session.profile().level, 2);
        assert_eq!(session.profile().xp, 50.0);
        assert!(session.quests()[0].completed);

        assert!(session.complete_item("a").await.unwrap().is_none());
        assert_eq!(session.profile().xp, 50.0);
        assert_eq!(harness.repo.saves(), 1);
        assert_eq!(harness.repo.stored().unwrap().level, 2);
    }

    #[tokio::test]
    async fn test_complete_unknown_item_is_noop() {
        let harness = Harness::new(vec![Ok(quests_json(&["a"]))]);
        let mut session = harness.session(profile());
        session.refresh_quests(false).await;

        assert!(session.complete_item("missing").await.unwrap().is_none());
        assert_eq!(harness.repo.saves(), 0);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_session_untouched() {
        let harness = Harness::new(vec![Ok(quests_json(&["a"]))]);
        let mut session = harness.session(profile());
        session.refresh_quests(false).await;
        harness.repo.fail_saves(true);

        let result = session.complete_item("a").await;

        assert!(matches!(result, Err(DomainError::Repository(_))));
        assert_eq!(session.profile().level, 1);
        assert_eq!(session.profile().xp, 0.0);
        assert!(!session.quests()[0].completed);

        harness.repo.fail_saves(false);
        assert!(session.complete_item("a").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_gain_experience_rejects_invalid_amounts() {
        let harness = Harness::new(Vec::new());
        let mut session = harness.session(profile());

        for amount in [-1.0, f64::NAN, f64::INFINITY, MAX_GAIN + 1.0, 1e300] {
            let result = session.gain_experience(amount, StatCategory::Vitality).await;
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }
        assert_eq!(harness.repo.saves(), 0);
    }

    #[tokio::test]
    async fn test_zero_gain_still_persists() {
        let harness = Harness::new(Vec::new());
        let mut session = harness.session(profile());

        let outcome = session
            .gain_experience(0.0, StatCategory::Strength)
            .await
            .unwrap();

        assert!(!outcome.leveled_up());
        assert_eq!(harness.repo.saves(), 1);
    }

    #[tokio::test]
    async fn test_gain_reaching_rank_d() {
        let harness = Harness::new(Vec::new());
        let mut p = profile();
        p.level = 9;
        let mut session = harness.session(p);

        let outcome = session
            .gain_experience(900.0, StatCategory::Agility)
            .await
            .unwrap();

        assert_eq!(session.profile().level, 10);
        assert_eq!(outcome.rank, Rank::D);
        assert!(outcome.rank_changed());
        assert_eq!(harness.repo.stored().unwrap().rank, Rank::D);
    }

    #[tokio::test]
    async fn test_martial_progress_survives_style_switch() {
        let harness = Harness::new(Vec::new());
        let mut session = harness.session(profile_with_style(MartialStyle::Boxing));

        let outcome = session
            .gain_experience(90.0, StatCategory::Agility)
            .await
            .unwrap();
        assert!(outcome
            .level_ups
            .iter()
            .any(|e| e.track == Track::Martial(MartialStyle::Boxing) && e.new_level == 2));

        session.set_martial_style(MartialStyle::MuayThai).await.unwrap();
        session
            .gain_experience(10.0, StatCategory::Agility)
            .await
            .unwrap();

        let progress = &session.profile().martial_progress;
        assert_eq!(progress[&MartialStyle::Boxing].level, 2);
        assert_eq!(progress[&MartialStyle::Boxing].xp, 10.0);
        assert_eq!(progress[&MartialStyle::MuayThai].level, 1);
        assert_eq!(progress[&MartialStyle::MuayThai].xp, 10.0);

        session.set_martial_style(MartialStyle::Boxing).await.unwrap();
        assert_eq!(session.profile().active_martial_progress().unwrap().level, 2);
    }

    #[tokio::test]
    async fn test_refresh_uses_cache_unless_forced() {
        let harness = Harness::new(vec![
            Ok(quests_json(&["a", "b"])),
            Ok(quests_json(&["c"])),
        ]);
        let mut session = harness.session(profile());

        session.refresh_quests(false).await;
        session.refresh_quests(false).await;
        assert_eq!(harness.generator.calls(), 1);
        assert_eq!(session.quests().len(), 2);

        let ids: Vec<_> = session
            .refresh_quests(true)
            .await
            .iter()
            .map(|q| q.id.clone())
            .collect();
        assert_eq!(ids, vec!["c".to_string()]);
        assert_eq!(harness.generator.calls(), 2);

        let cached = harness.cache.entry(&session.current_quest_context()).unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_replaces_completed_list() {
        let harness = Harness::new(vec![
            Ok(quests_json(&["a"])),
            Ok(quests_json(&["a", "b"])),
        ]);
        let mut session = harness.session(profile());
        session.refresh_quests(false).await;
        session.complete_item("a").await.unwrap();

        session.refresh_quests(true).await;

        assert_eq!(session.quests().len(), 2);
        assert!(session.quests().iter().all(|q| !q.completed));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let harness = Harness::new(vec![Err(GenerationError::Api {
            status: 500,
            message: "boom".to_string(),
        })]);
        let mut session = harness.session(profile());

        assert!(session.refresh_quests(false).await.is_empty());
        assert!(harness.cache.entry(&session.current_quest_context()).is_none());
    }

    #[tokio::test]
    async fn test_fallback_quests_are_not_cached() {
        let harness = Harness::unconfigured();
        let mut session = harness.session(profile());

        let quests = session.refresh_quests(false).await;
        assert_eq!(quests.len(), arise::domain::FALLBACK_BATCH);
        assert!(harness.cache.entry(&session.current_quest_context()).is_none());
        assert_eq!(harness.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_difficulty_change_clears_and_invalidates() {
        let harness = Harness::new(vec![Ok(quests_json(&["a"]))]);
        let mut session = harness.session(profile());
        session.refresh_quests(false).await;

        let hard = ContentContext::Quests {
            location: session.profile().preferred_location.unwrap_or_default(),
            difficulty: Difficulty::Hard,
        };
        harness
            .cache
            .put(&hard, &ContentList::Quests(Vec::new()))
            .await
            .unwrap();

        session.set_difficulty(Difficulty::Hard).await.unwrap();

        assert!(session.quests().is_empty());
        assert!(session.quest_context().is_none());
        assert!(harness.cache.entry(&hard).is_none());
        assert_eq!(harness.repo.stored().unwrap().difficulty, Difficulty::Hard);
    }

    #[tokio::test]
    async fn test_location_change_drops_quests_for_old_location() {
        let harness = Harness::new(vec![Ok(quests_json(&["a"]))]);
        let mut session = harness.session(profile());
        session.refresh_quests(false).await;

        session.set_location(TrainingLocation::Gym).await.unwrap();

        assert!(session.quests().is_empty());
        assert_eq!(
            session.profile().preferred_location,
            Some(TrainingLocation::Gym)
        );
    }

    #[tokio::test]
    async fn test_failed_setting_save_keeps_profile() {
        let harness = Harness::new(Vec::new());
        let mut session = harness.session(profile());
        harness.repo.fail_saves(true);

        assert!(session.set_difficulty(Difficulty::Hell).await.is_err());
        assert_eq!(session.profile().difficulty, Difficulty::Normal);
    }

    #[tokio::test]
    async fn test_tips_are_cached_per_goal() {
        let harness = Harness::new(vec![Ok(tips_json())]);
        let mut session = harness.session(profile());

        assert_eq!(session.refresh_tips(false).await.len(), 1);
        assert_eq!(
            session.tips_context().map(|c| c.kind()),
            Some(ContentKind::Tips)
        );

        session.set_goal("Weight loss").await.unwrap();
        assert!(session.tips().is_empty());
        assert!(session.refresh_tips(false).await.is_empty());
        assert_eq!(harness.generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_blank_goal_rejected() {
        let harness = Harness::new(Vec::new());
        let mut session = harness.session(profile());

        assert!(matches!(
            session.set_goal("  ").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_drills_require_style() {
        let harness = Harness::new(Vec::new());
        let mut session = harness.session(profile());

        assert!(session.refresh_drills(false).await.is_empty());
        assert!(session.drill_context().is_none());
        assert_eq!(harness.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_drills_for_active_style() {
        let drills =
            r#"[{"title": "Jab", "description": "Snap it", "reps": "3x2min", "isPhysical": true}]"#;
        let harness = Harness::new(vec![Ok(drills.to_string())]);
        let mut session = harness.session(profile_with_style(MartialStyle::Boxing));

        assert_eq!(session.refresh_drills(false).await.len(), 1);
        assert_eq!(
            session.drill_context(),
            Some(&ContentContext::Drills {
                style: MartialStyle::Boxing,
                level: 1
            })
        );

        session.set_martial_style(MartialStyle::Karate).await.unwrap();
        assert!(session.drills().is_empty());
    }

    #[tokio::test]
    async fn test_memory_repository_starts_empty() {
        let repo = MemoryProfileRepository::default();
        assert!(repo.load().await.is_none());
    }
}
