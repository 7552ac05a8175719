use crate::config::Config;
use crate::search::{SearchError, SearchHit, SearchProvider};
use anyhow::{Context, Result};
use quick_xml::events::Event;
use reqwest::StatusCode;
use std::time::Duration;

/// Placeholder used when a result document has no `<url>`
pub const MISSING_URL: &str = "Нет ссылки";
/// Placeholder used when a result document has no `<headline>`
pub const MISSING_TITLE: &str = "Нет описания";

/// Yandex "no results" error code in an otherwise valid response
const NO_RESULTS_CODE: &str = "15";

/// Yandex Search XML API provider
///
/// Documentation: https://yandex.cloud/en/docs/search-api/
pub struct YandexSearchProvider {
    client: reqwest::Client,
    url: String,
    user: String,
    api_key: String,
    l10n: String,
    folder_id: String,
    region: Option<u32>,
}

impl YandexSearchProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client for Yandex Search")?;

        Ok(Self {
            client,
            url: config.search.url.clone(),
            user: config.search.user.clone(),
            api_key: config.search_api_key.clone(),
            l10n: config.search.l10n.clone(),
            folder_id: config.folder_id.clone(),
            region: config.search.region,
        })
    }

    fn query_params(&self, query: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("user", self.user.clone()),
            ("apikey", self.api_key.clone()),
            ("l10n", self.l10n.clone()),
            ("query", query.to_string()),
            ("folderid", self.folder_id.clone()),
        ];
        if let Some(region) = self.region {
            params.push(("region", region.to_string()));
        }
        params
    }
}

#[async_trait::async_trait]
impl SearchProvider for YandexSearchProvider {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        tracing::debug!(query = %query, "performing yandex search");

        let response = self
            .client
            .get(&self.url)
            .query(&self.query_params(query))
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            tracing::warn!(
                status = %status,
                error = %crate::logging::redact_secrets(&error_text),
                "yandex search api error"
            );

            return Err(SearchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let hits = parse_results(&body)?;

        tracing::debug!(
            query = %query,
            result_count = hits.len(),
            "yandex search completed"
        );

        Ok(hits)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Url,
    Headline,
}

#[derive(Default)]
struct Doc {
    url: Option<String>,
    headline: Option<String>,
}

impl Doc {
    fn into_hit(self) -> SearchHit {
        let url = self
            .url
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| MISSING_URL.to_string());
        let title = self
            .headline
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| MISSING_TITLE.to_string());
        SearchHit { title, url }
    }
}

/// Decode a Yandex XML response into hits, in document order.
///
/// Every `<doc>` element becomes one hit built from its direct `<url>` and
/// `<headline>` children. A response-level `<error code="15">` means zero hits;
/// any other response-level error is reported.
pub fn parse_results(xml: &str) -> Result<Vec<SearchHit>, SearchError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut hits = Vec::new();

    let mut doc: Option<Doc> = None;
    let mut depth = 0usize;
    let mut field: Option<Field> = None;
    let mut parts: Vec<String> = Vec::new();

    let mut in_error = false;
    let mut error_code: Option<String> = None;
    let mut error_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if doc.is_some() {
                    depth += 1;
                    if depth == 1 {
                        field = match name.as_ref() {
                            b"url" => Some(Field::Url),
                            b"headline" => Some(Field::Headline),
                            _ => None,
                        };
                        parts.clear();
                    }
                } else if name.as_ref() == b"doc" {
                    doc = Some(Doc::default());
                    depth = 0;
                } else if name.as_ref() == b"error" {
                    in_error = true;
                    for a in e.attributes().flatten() {
                        if a.key.as_ref() == b"code" {
                            error_code = a.unescape_value().map(|v| v.to_string()).ok();
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(d) = doc.as_mut() {
                    if depth == 0 {
                        match e.local_name().as_ref() {
                            b"url" => d.url = Some(String::new()),
                            b"headline" => d.headline = Some(String::new()),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Text(t)) => {
                let txt = t.unescape().map(|t| t.to_string()).unwrap_or_default();
                if field.is_some() {
                    parts.push(txt);
                } else if in_error {
                    error_text.push_str(&txt);
                }
            }
            Ok(Event::CData(c)) => {
                if field.is_some() {
                    parts.push(String::from_utf8_lossy(&c.into_inner()).to_string());
                }
            }
            Ok(Event::End(e)) => {
                if doc.is_some() && depth == 0 {
                    if let Some(finished) = doc.take() {
                        hits.push(finished.into_hit());
                    }
                } else if let Some(d) = doc.as_mut() {
                    if depth == 1 {
                        if let Some(f) = field.take() {
                            let value = normalize_ws(&parts.join(" "));
                            match f {
                                Field::Url => d.url = Some(value),
                                Field::Headline => d.headline = Some(value),
                            }
                        }
                    }
                    depth -= 1;
                } else if e.local_name().as_ref() == b"error" {
                    in_error = false;
                }
            }
            Ok(_) => {}
            Err(e) => return Err(SearchError::Xml(e.to_string())),
        }
    }

    if hits.is_empty() {
        if let Some(code) = error_code {
            if code != NO_RESULTS_CODE {
                return Err(SearchError::Xml(format!(
                    "provider error {code}: {}",
                    error_text.trim()
                )));
            }
        }
    }

    Ok(hits)
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
