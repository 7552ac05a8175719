pub mod retry;
pub mod types;
pub mod yandex;

pub use yandex::YandexGptClient;

/// LLM provider abstraction: one prompt in, one completion out
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// LLM-related errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Non-retryable, non-success status. The model "does not know".
    #[error("LLM returned status {status}")]
    Unknown { status: u16 },

    /// Still rate-limited after the last allowed attempt
    #[error("LLM still rate-limited after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),
}
