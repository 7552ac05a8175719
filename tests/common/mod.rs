//! Common test utilities: in-process provider fakes and local stub servers

#![allow(dead_code)]

use axum::Router;
use qa::config::Config;
use qa::extract::{ExtractError, PageExtractor};
use qa::llm::retry::Sleeper;
use qa::llm::{LlmError, LlmProvider};
use qa::search::{SearchError, SearchHit, SearchProvider};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

pub const ITMO_STEM: &str = "В каком году Университет ИТМО был включён в число Национальных исследовательских университетов России?";
pub const ITMO_OPTIONS: &str = "1. 2007\n2. 2009\n3. 2011\n4. 2015";

pub fn itmo_question() -> String {
    format!("{ITMO_STEM}\n{ITMO_OPTIONS}")
}

/// Config with dummy credentials and default tunables
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.folder_id = "b1gtestfolder".to_string();
    config.llm_api_key = "llm-test-key".to_string();
    config.search_api_key = "search-test-key".to_string();
    config.http_timeout_secs = 5;
    config
}

/// Bind `app` to an ephemeral localhost port and serve it in the background.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Search fake: fixed results per query, `Err(status)` for a failing query
#[derive(Default)]
pub struct StaticSearch {
    results: HashMap<String, Result<Vec<SearchHit>, u16>>,
    pub queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.results.insert(query.to_string(), Ok(hits));
        self
    }

    pub fn failing(mut self, query: &str, status: u16) -> Self {
        self.results.insert(query.to_string(), Err(status));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.results.get(query) {
            Some(Ok(hits)) => Ok(hits.clone()),
            Some(Err(status)) => Err(SearchError::Http { status: *status }),
            None => Ok(Vec::new()),
        }
    }
}

/// Page fake: known URLs return their text, unknown URLs fail with 404
#[derive(Default)]
pub struct StaticPages {
    pages: HashMap<String, String>,
    pub fetched: Mutex<Vec<String>>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, text: &str) -> Self {
        self.pages.insert(url.to_string(), text.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PageExtractor for StaticPages {
    async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or(ExtractError::Http { status: 404 })
    }
}

type Reply = Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>;

/// LLM fake: replies computed from the prompt, every prompt recorded
pub struct ScriptedLlm {
    reply: Reply,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(reply: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Relevance: useful unless the excerpt contains "мусор";
    /// selection: `selection`; justification: `justification`.
    pub fn quiz(selection: &'static str, justification: &'static str) -> Self {
        Self::new(move |prompt| {
            Ok(match classify(prompt) {
                PromptKind::Relevance if prompt.contains("мусор") => "Нет".to_string(),
                PromptKind::Relevance => "Да, полезна".to_string(),
                PromptKind::Selection => selection.to_string(),
                PromptKind::Justification => justification.to_string(),
            })
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn count(&self, kind: PromptKind) -> usize {
        self.prompts()
            .iter()
            .filter(|p| classify(p) == kind)
            .count()
    }
}

#[async_trait::async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Relevance,
    Selection,
    Justification,
}

pub fn classify(prompt: &str) -> PromptKind {
    if prompt.contains("Полезна ли следующая информация") {
        PromptKind::Relevance
    } else if prompt.contains("ровно 1 число") {
        PromptKind::Selection
    } else {
        PromptKind::Justification
    }
}

pub fn hit(url: &str) -> SearchHit {
    SearchHit::new(format!("title of {url}"), url)
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}
