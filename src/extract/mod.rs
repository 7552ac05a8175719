//! Page text extraction: fetch a URL and pull a plain-text excerpt out of its HTML.

pub mod html;

pub use html::extract_main_text;

use crate::config::Config;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;

/// Page text extractor abstraction
#[async_trait::async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetch `url` and return its main text (untruncated).
    async fn extract(&self, url: &str) -> Result<String, ExtractError>;
}

/// Page extraction errors; any of these stops the source pipeline's candidate scan
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Ошибка при загрузке страницы: {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Основной контент не найден")]
    NoContent,
}

/// Plain GET fetcher; no special headers
pub struct HttpPageExtractor {
    client: reqwest::Client,
}

impl HttpPageExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client for page fetching")?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageExtractor for HttpPageExtractor {
    async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        tracing::debug!(url = %url, "fetching page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(url = %url, status = %status, "page fetch failed");
            return Err(ExtractError::Http {
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        let text = extract_main_text(&html).ok_or(ExtractError::NoContent)?;

        tracing::debug!(url = %url, content_len = text.len(), "page text extracted");
        Ok(text)
    }
}
