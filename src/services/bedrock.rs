use crate::config::BedrockSettings;
use crate::models::GenerationParams;
use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when generating text
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Model declined to generate: {0}")]
    Declined(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport(e) => e.is_timeout() || e.is_connect(),
            GatewayError::Service { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            GatewayError::Declined(_) | GatewayError::InvalidResponse(_) => false,
        }
    }
}

/// Anything that can turn a prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Retry schedule for transient failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retrying after the given (1-based) failed attempt
    ///
    /// Exponential in the attempt number, capped at `max_backoff`, then scaled
    /// by `jitter` in `[0, 1]`.
    pub fn backoff(&self, attempt: u32, jitter: f64) -> Duration {
        let exp = attempt.saturating_sub(1).min(31);
        let ceiling = self
            .base_delay
            .saturating_mul(1u32 << exp)
            .min(self.max_backoff);
        ceiling.mul_f64(jitter.clamp(0.0, 1.0))
    }
}

impl From<&BedrockSettings> for RetryPolicy {
    fn from(settings: &BedrockSettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            base_delay: Duration::from_millis(settings.retry_base_delay_ms),
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
        }
    }
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    generation: Option<String>,
    stop_reason: Option<String>,
}

/// Amazon Bedrock runtime client
///
/// Invokes a text-generation model with a fixed set of sampling parameters
/// and returns the `generation` field of the response. Authenticates with a
/// Bedrock API key sent as a bearer token.
pub struct BedrockClient {
    endpoint: String,
    api_key: String,
    model_id: String,
    params: GenerationParams,
    retry: RetryPolicy,
    client: Client,
}

impl BedrockClient {
    /// Create a new Bedrock client
    pub fn new(settings: &BedrockSettings, params: GenerationParams) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: settings.endpoint_url(),
            api_key: settings.api_key.clone(),
            model_id: settings.model_id.clone(),
            params,
            retry: RetryPolicy::from(settings),
            client,
        })
    }

    fn invoke_url(&self) -> String {
        format!(
            "{}/model/{}/invoke",
            self.endpoint,
            urlencoding::encode(&self.model_id)
        )
    }

    async fn invoke_once(&self, body: &InvokeRequest<'_>) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(self.invoke_url())
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Service {
                status: status.as_u16(),
                message: service_message(status, &text),
            });
        }

        let parsed: InvokeResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("Failed to parse model response: {}", e)))?;

        if parsed.stop_reason.as_deref() == Some("content_filtered") {
            return Err(GatewayError::Declined("output was content filtered".into()));
        }

        match parsed.generation {
            Some(generation) if !generation.trim().is_empty() => Ok(generation),
            _ => Err(GatewayError::Declined(format!(
                "response contained no generation (stop_reason: {})",
                parsed.stop_reason.as_deref().unwrap_or("none")
            ))),
        }
    }
}

#[async_trait]
impl TextGenerator for BedrockClient {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = InvokeRequest {
            prompt,
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
        };

        let mut attempt = 1;
        loop {
            tracing::debug!("Invoking model {} (attempt {})", self.model_id, attempt);

            match self.invoke_once(&body).await {
                Ok(generation) => return Ok(generation),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt, rand::thread_rng().gen::<f64>());
                    tracing::warn!(
                        "Model invocation failed on attempt {}/{}, retrying in {:?}: {}",
                        attempt,
                        self.retry.max_attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Pull the `message` out of a Bedrock error body, falling back to the raw text
fn service_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.to_string()
            }
        })
}
