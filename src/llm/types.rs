use serde::{Deserialize, Serialize};

/// Message role in a completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single message; YandexGPT calls the body `text`, not `content`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionOptions {
    pub stream: bool,
    pub temperature: f32,
}

/// Request body for the completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub model_uri: String,
    pub completion_options: CompletionOptions,
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    pub fn single_prompt(model_uri: impl Into<String>, temperature: f32, prompt: &str) -> Self {
        Self {
            model_uri: model_uri.into(),
            completion_options: CompletionOptions {
                stream: false,
                temperature,
            },
            messages: vec![Message::user(prompt)],
        }
    }
}

/// Successful response: `result.alternatives[0].message.text`
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    pub result: CompletionResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResult {
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alternative {
    pub message: AlternativeMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlternativeMessage {
    pub text: String,
}

impl CompletionResponse {
    /// Text of the top alternative, if the model returned any.
    pub fn into_text(self) -> Option<String> {
        self.result
            .alternatives
            .into_iter()
            .next()
            .map(|alt| alt.message.text)
    }
}
