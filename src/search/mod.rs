pub mod providers;

pub use providers::YandexSearchProvider;

/// Search provider abstraction - different providers can be plugged in
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query and return hits most-relevant-first.
    ///
    /// `Ok(vec![])` means the provider answered with zero hits; failures are `Err`.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// Individual search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Page title (headline)
    pub title: String,
    /// Page URL
    pub url: String,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Search-related errors
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Ошибка: {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid XML response: {0}")]
    Xml(String),
}
