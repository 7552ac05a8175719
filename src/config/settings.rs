use serde::{Deserialize, Serialize};

/// Main configuration structure
///
/// Credentials are never read from the TOML file; they come from the
/// environment (or `.env`) and are filled in by [`super::Config::from_sources`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Yandex Cloud folder id (`FOLDER_ID`)
    #[serde(skip)]
    pub folder_id: String,

    /// YandexGPT API key (`YANDEXGPT_KEY`)
    #[serde(skip)]
    pub llm_api_key: String,

    /// Yandex Search API key (`YANDEX_SEARCH_KEY`)
    #[serde(skip)]
    pub search_api_key: String,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Timeout applied to every outbound HTTP call, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub pipeline: PipelineSettings,

    #[serde(default)]
    pub retry: RetrySettings,

    /// Write logs to a file instead of stderr
    #[serde(default)]
    pub debug: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_rotation: Option<DebugLogRotation>,

    /// How many rotated log files to keep (0 = keep all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_log_keep: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder_id: String::new(),
            llm_api_key: String::new(),
            search_api_key: String::new(),
            bind: default_bind(),
            http_timeout_secs: default_http_timeout_secs(),
            llm: LlmSettings::default(),
            search: SearchSettings::default(),
            pipeline: PipelineSettings::default(),
            retry: RetrySettings::default(),
            debug: false,
            debug_log_path: None,
            debug_log_rotation: None,
            debug_log_keep: None,
        }
    }
}

impl Config {
    /// Model URI in the form the completion endpoint expects.
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}", self.folder_id, self.llm.model)
    }
}

/// YandexGPT completion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub url: String,
    /// Model name appended to the folder id, e.g. `yandexgpt/latest`
    pub model: String,
    pub temperature: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            url: "https://llm.api.cloud.yandex.net/foundationModels/v1/completion".to_string(),
            model: "yandexgpt/latest".to_string(),
            temperature: 0.6,
        }
    }
}

/// Yandex Search XML API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub url: String,
    pub user: String,
    pub l10n: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<u32>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            url: "https://yandex.ru/search/xml".to_string(),
            user: "default".to_string(),
            l10n: "ru".to_string(),
            region: None,
        }
    }
}

/// Source pipeline limits
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PipelineSettings {
    /// Hits kept from each search pass before interleaving
    pub hits_per_query: usize,
    /// Maximum number of accepted sources
    pub source_quota: usize,
    /// Excerpt length in characters
    pub excerpt_chars: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            hits_per_query: 4,
            source_quota: 3,
            excerpt_chars: 2000,
        }
    }
}

/// Rate-limit backoff for the LLM client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub step_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            base_delay_ms: 1000,
            step_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DebugLogRotation {
    None,
    Daily,
    Session,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_http_timeout_secs() -> u64 {
    30
}
