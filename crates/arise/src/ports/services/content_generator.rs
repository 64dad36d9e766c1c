//! Content Generator Port
//!
//! Abstract interface for the external generative text service that
//! writes quests, tips and drills. Implementations can be swapped between
//! providers (Gemini, OpenAI, a local model, a test double).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ContentKind;

pub use crate::domain::errors::GenerationError;

/// A single generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Natural-language prompt
    pub prompt: String,
    /// Expected content schema; `None` asks for free text
    pub kind: Option<ContentKind>,
}

impl GenerationRequest {
    /// Request a JSON array matching the schema of `kind`
    pub fn structured(kind: ContentKind, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: Some(kind),
        }
    }

    /// Request free text
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            kind: None,
        }
    }
}

/// Generative content provider interface
///
/// # Example
///
/// ```rust,ignore
/// use arise::ports::ContentGenerator;
///
/// struct GeminiGenerator { /* ... */ }
///
/// #[async_trait]
/// impl ContentGenerator for GeminiGenerator {
///     async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
///         // Call the Gemini API
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate raw text for the request. Parsing is the caller's job.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Whether credentials are present. Unconfigured generators are never called.
    fn is_configured(&self) -> bool;

    /// Get the provider name (e.g., "gemini")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
