//! Content Gateway (Use Case)
//!
//! Boundary to the generative content provider: builds the prompt, retries
//! rate limits with backoff, parses the answer. Every failure degrades to
//! empty content; nothing propagates to the caller.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use arise::domain::{awakening_prompt, build_prompt, fallback_quests};
use arise::{
    parse_content, ContentContext, ContentGenerator, ContentList, GenerationError,
    GenerationRequest, Profile, RetryPolicy,
};

const AWAKENING_FALLBACK: &str =
    "The System acknowledges your awakening. Your training begins now.";

/// Application service wrapping the content generator
pub struct ContentGateway<G: ContentGenerator> {
    generator: Arc<G>,
    policy: RetryPolicy,
}

impl<G: ContentGenerator> ContentGateway<G> {
    pub fn new(generator: Arc<G>, policy: RetryPolicy) -> Self {
        Self { generator, policy }
    }

    /// Whether results come from the live generator rather than fallbacks
    pub fn is_live(&self) -> bool {
        self.generator.is_configured()
    }

    /// Fetch content for `context`.
    ///
    /// Without credentials quests come from the built-in set and other kinds
    /// are empty. Returned quests are stamped with the context's location.
    pub async fn fetch(&self, profile: &Profile, context: &ContentContext) -> ContentList {
        if !self.generator.is_configured() {
            warn!(context = %context, "No generator credentials, serving fallback content");
            return match context {
                ContentContext::Quests { location, .. } => {
                    ContentList::Quests(fallback_quests(*location))
                }
                other => ContentList::empty(other.kind()),
            };
        }

        let request = GenerationRequest::structured(context.kind(), build_prompt(profile, context));
        let text = match self.generate_with_retry(&request).await {
            Ok(text) => text,
            Err(e) => {
                error!(
                    context = %context,
                    model = self.generator.model_id(),
                    error = %e,
                    "Content generation failed"
                );
                return ContentList::empty(context.kind());
            }
        };

        match parse_content(context, &text) {
            Ok(content) => {
                info!(
                    context = %context,
                    model = self.generator.model_id(),
                    items = content.len(),
                    "Content generated"
                );
                content
            }
            Err(e) => {
                warn!(context = %context, error = %e, "Generator returned malformed content");
                ContentList::empty(context.kind())
            }
        }
    }

    /// Short greeting for a freshly awakened hunter
    pub async fn awakening_message(&self, profile: &Profile) -> String {
        if !self.generator.is_configured() {
            return AWAKENING_FALLBACK.to_string();
        }

        let request = GenerationRequest::text(awakening_prompt(profile));
        match self.generate_with_retry(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Awakening message unavailable");
                AWAKENING_FALLBACK.to_string()
            }
        }
    }

    /// Call the generator, retrying rate limits per the policy
    async fn generate_with_retry(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let provider = self.generator.provider_name();
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(provider, model = self.generator.model_id(), attempt, "Calling generator");
            let err = match self.generator.generate(request).await {
                Ok(text) => return Ok(text),
                Err(err) => err,
            };

            if !self.policy.should_retry(&err, attempt) {
                if err.is_rate_limited() {
                    warn!(
                        "{provider} rate limit persisted - max attempts ({max_attempts}) reached"
                    );
                }
                return Err(err);
            }

            let retry_after = match &err {
                GenerationError::RateLimited { retry_after } => *retry_after,
                _ => None,
            };
            let backoff = self.policy.backoff(attempt, retry_after);
            warn!(
                "{provider} rate limit hit - retry {attempt}/{max_attempts} after {}ms backoff",
                backoff.as_millis()
            );
            tokio::time::sleep(backoff).await;
        }
    }
}
