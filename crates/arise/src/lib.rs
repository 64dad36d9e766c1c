//! Arise Domain Library
//!
//! Core domain types and interfaces for the Arise hunter progression system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Profile, ActivityItem, Tip, Drill)
//!   - `value_objects/`: Immutable value types (Rank, Difficulty, MartialStyle, RetryPolicy)
//!   - `services/`: Progression engine, content parsing, prompt building
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Profile store and content cache interfaces
//!   - `services/`: Generative content provider interface
//!
//! # Usage
//!
//! ```rust,ignore
//! use arise::domain::{Profile, ProgressionEngine, StatCategory};
//!
//! let engine = ProgressionEngine::default();
//! let events = engine.apply(&mut profile, 250.0, StatCategory::Strength);
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    parse_content, ActivityItem, ContentContext, ContentKind, ContentList, Difficulty, DomainError,
    Drill, GainOutcome, LevelUp, MartialProgress, MartialStyle, Onboarding, ParseError, Profile,
    ProgressionConfig, ProgressionEngine, Rank, RankStrategy, RetryPolicy, StatCategory, Stats,
    Tip, TipImportance, Track, TrainingLocation,
};
pub use ports::{
    // Repositories
    ContentCache,
    // Services
    ContentGenerator,
    GenerationError,
    GenerationRequest,
    ProfileRepository,
};
