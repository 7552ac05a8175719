use crate::config::Config;
use crate::llm::retry::{RetryPolicy, Sleeper, TokioSleeper};
use crate::llm::types::{CompletionRequest, CompletionResponse};
use crate::llm::{LlmError, LlmProvider};
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// YandexGPT completion client
///
/// Retries only on HTTP 429, sleeping 1, 2, 3, ... time units between attempts.
/// Any other non-200 status ends the call with [`LlmError::Unknown`].
#[derive(Clone)]
pub struct YandexGptClient {
    client: Client,
    url: String,
    api_key: String,
    folder_id: String,
    model_uri: String,
    temperature: f32,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl YandexGptClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client for YandexGPT")?;

        Ok(Self {
            client,
            url: config.llm.url.clone(),
            api_key: config.llm_api_key.clone(),
            folder_id: config.folder_id.clone(),
            model_uri: config.model_uri(),
            temperature: config.llm.temperature,
            policy: config.retry.into(),
            sleeper: Arc::new(TokioSleeper),
        })
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }
}

#[async_trait::async_trait]
impl LlmProvider for YandexGptClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let body = CompletionRequest::single_prompt(&self.model_uri, self.temperature, prompt);

        tracing::debug!(
            model_uri = %self.model_uri,
            prompt_chars = prompt.chars().count(),
            "yandexgpt completion request"
        );

        for attempt in 1..=self.policy.max_attempts {
            let response = self
                .client
                .post(&self.url)
                .header("Authorization", format!("Api-Key {}", self.api_key))
                .header("x-folder-id", &self.folder_id)
                .json(&body)
                .send()
                .await?;

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt == self.policy.max_attempts {
                    break;
                }
                let delay = self.policy.delay_after(attempt);
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "yandexgpt rate-limited, backing off"
                );
                self.sleeper.sleep(delay).await;
                continue;
            }

            if status != StatusCode::OK {
                let error_text = response.text().await.unwrap_or_default();
                tracing::warn!(
                    status = %status,
                    error = %crate::logging::redact_secrets(&error_text),
                    "yandexgpt returned error"
                );
                return Err(LlmError::Unknown {
                    status: status.as_u16(),
                });
            }

            let raw = response.text().await?;
            let parsed: CompletionResponse = serde_json::from_str(&raw)
                .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

            let text = parsed
                .into_text()
                .ok_or_else(|| LlmError::MalformedResponse("no alternatives".to_string()))?;

            tracing::debug!(
                attempt,
                reply_chars = text.chars().count(),
                "yandexgpt completion done"
            );
            return Ok(text);
        }

        tracing::warn!(attempts = self.policy.max_attempts, "yandexgpt rate limit never cleared");
        Err(LlmError::Exhausted {
            attempts: self.policy.max_attempts,
        })
    }
}
