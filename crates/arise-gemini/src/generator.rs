//! Gemini implementation of the ContentGenerator port
//!
//! Calls `generateContent` and classifies failures so the gateway can
//! retry rate limits and give up on everything else.

use std::time::Duration;

use arise::{ContentGenerator, GenerationError, GenerationRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GeminiConfig;
use crate::schema::response_schema;

const PROVIDER: &str = "gemini";

/// Content generator backed by Gemini
#[derive(Clone)]
pub struct GeminiContentGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiContentGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build tuned HTTP client, using defaults");
                Client::new()
            });
        Self { client, config }
    }

    async fn perform(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model = self.config.model,
        );

        let body = GenerateContentRequest::from_request(request);
        debug!(model = %self.config.model, kind = ?request.kind, "Calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerationError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, &body, retry_after));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| GenerationError::Request(format!("invalid response body: {err}")))?;

        extract_text(&payload).ok_or(GenerationError::EmptyResponse)
    }
}

#[async_trait]
impl ContentGenerator for GeminiContentGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let Some(api_key) = self.config.usable_key() else {
            return Err(GenerationError::MissingCredentials);
        };
        self.perform(api_key, request).await
    }

    fn is_configured(&self) -> bool {
        self.config.usable_key().is_some()
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

// ============================================
// Request Types
// ============================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

impl GenerateContentRequest {
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: request.kind.map(|kind| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(kind),
            }),
        }
    }
}

// ============================================
// Helper Functions
// ============================================

/// Concatenate the text parts of the first candidate
fn extract_text(root: &Value) -> Option<String> {
    let parts = root
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// `retryDelay` from a google.rpc.RetryInfo detail, e.g. "17s"
fn retry_delay_from_body(error: &Value) -> Option<Duration> {
    error
        .get("details")?
        .as_array()?
        .iter()
        .filter_map(|detail| detail.get("retryDelay").and_then(|d| d.as_str()))
        .find_map(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
}

fn map_http_error(
    status: StatusCode,
    body: &str,
    retry_after: Option<Duration>,
) -> GenerationError {
    let error = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("error").cloned());

    let message = error
        .as_ref()
        .and_then(|err| err.get("message"))
        .and_then(|msg| msg.as_str())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| body.to_string());
    let rpc_status = error
        .as_ref()
        .and_then(|err| err.get("status"))
        .and_then(|s| s.as_str())
        .unwrap_or_default();

    if status == StatusCode::TOO_MANY_REQUESTS
        || rpc_status == "RESOURCE_EXHAUSTED"
        || message.to_lowercase().contains("quota")
    {
        let retry_after = retry_after.or_else(|| error.as_ref().and_then(retry_delay_from_body));
        return GenerationError::RateLimited { retry_after };
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return GenerationError::Unauthorized(message);
    }

    GenerationError::Api {
        status: status.as_u16(),
        message,
    }
}
