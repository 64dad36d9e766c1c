//! In-memory port implementations for application tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use arise::{
    ContentCache, ContentContext, ContentGenerator, ContentList, DomainError, GenerationError,
    GenerationRequest, MartialStyle, Onboarding, Profile, ProfileRepository, ProgressionEngine,
    RetryPolicy,
};

use super::{ContentGateway, Session};

pub type TestSession = Session<MemoryProfileRepository, MemoryContentCache, ScriptedGenerator>;

pub fn profile() -> Profile {
    Profile::awaken(Onboarding::new("Jinwoo")).unwrap()
}

pub fn profile_with_style(style: MartialStyle) -> Profile {
    Profile::awaken(Onboarding::new("Jinwoo").with_martial_style(style)).unwrap()
}

/// Generator output with one STR quest worth 150 XP per id
pub fn quests_json(ids: &[&str]) -> String {
    let items: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Quest {id}"),
                "description": "Do the thing",
                "reps": "10",
                "sets": "3",
                "instructions": "Carefully",
                "xpReward": 150,
                "category": "STR"
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

pub struct Harness {
    pub repo: Arc<MemoryProfileRepository>,
    pub cache: Arc<MemoryContentCache>,
    pub generator: Arc<ScriptedGenerator>,
}

impl Harness {
    pub fn new(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            repo: Arc::new(MemoryProfileRepository::default()),
            cache: Arc::new(MemoryContentCache::default()),
            generator: Arc::new(ScriptedGenerator::new(script)),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            generator: Arc::new(ScriptedGenerator::unconfigured()),
            ..Self::new(Vec::new())
        }
    }

    pub fn session(&self, profile: Profile) -> TestSession {
        Session::new(
            profile,
            self.repo.clone(),
            self.cache.clone(),
            ContentGateway::new(
                self.generator.clone(),
                RetryPolicy::new(3, Duration::ZERO),
            ),
            ProgressionEngine::default(),
        )
    }
}

#[derive(Default)]
pub struct MemoryProfileRepository {
    stored: Mutex<Option<Profile>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryProfileRepository {
    pub fn stored(&self) -> Option<Profile> {
        self.stored.lock().unwrap().clone()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn load(&self) -> Option<Profile> {
        self.stored()
    }

    async fn save(&self, profile: &Profile) -> Result<(), DomainError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(DomainError::Repository("disk full".to_string()));
        }
        *self.stored.lock().unwrap() = Some(profile.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryContentCache {
    entries: Mutex<HashMap<String, ContentList>>,
}

impl MemoryContentCache {
    pub fn entry(&self, context: &ContentContext) -> Option<ContentList> {
        self.entries
            .lock()
            .unwrap()
            .get(&context.cache_key())
            .cloned()
    }
}

#[async_trait]
impl ContentCache for MemoryContentCache {
    async fn get(&self, context: &ContentContext) -> Option<ContentList> {
        self.entry(context)
    }

    async fn put(
        &self,
        context: &ContentContext,
        content: &ContentList,
    ) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .insert(context.cache_key(), content.clone());
        Ok(())
    }

    async fn invalidate(&self, context: &ContentContext) -> Result<(), DomainError> {
        self.entries.lock().unwrap().remove(&context.cache_key());
        Ok(())
    }
}

/// Generator replaying a fixed script of results
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: AtomicUsize,
    configured: bool,
}

impl ScriptedGenerator {
    pub fn new(script: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            configured: true,
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GenerationError::EmptyResponse))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "script-1"
    }
}
