//! Source pipeline: search twice, interleave, and keep the sources the LLM judges useful.

use crate::config::settings::PipelineSettings;
use crate::extract::html::truncate_chars;
use crate::extract::PageExtractor;
use crate::llm::{LlmError, LlmProvider};
use crate::prompts;
use crate::question::Question;
use crate::search::{SearchHit, SearchProvider};
use std::sync::Arc;

/// An accepted source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub url: String,
    pub excerpt: String,
}

/// Sources accepted for one request, plus every URL that was evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceSet {
    pub sources: Vec<Evidence>,
    /// URLs evaluated this request, in order, each at most once
    pub checked: Vec<String>,
}

impl EvidenceSet {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn urls(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.url.clone()).collect()
    }

    fn already_checked(&self, url: &str) -> bool {
        self.checked.iter().any(|u| u == url)
    }
}

/// Relevance verdict assigned to a candidate excerpt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Useful,
    NotUseful,
    Unknown,
}

impl Verdict {
    fn from_reply(reply: &str) -> Self {
        if reply == prompts::USEFUL_VERDICT {
            Verdict::Useful
        } else {
            Verdict::NotUseful
        }
    }
}

/// Interleave two hit lists pairwise: a0, b0, a1, b1, ...
///
/// Pairwise zip semantics: the tail of the longer list is dropped.
pub fn interleave(first: Vec<SearchHit>, second: Vec<SearchHit>) -> Vec<SearchHit> {
    first
        .into_iter()
        .zip(second)
        .flat_map(|(a, b)| [a, b])
        .collect()
}

pub struct SourcePipeline {
    search: Arc<dyn SearchProvider>,
    extractor: Arc<dyn PageExtractor>,
    llm: Arc<dyn LlmProvider>,
    settings: PipelineSettings,
}

impl SourcePipeline {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        extractor: Arc<dyn PageExtractor>,
        llm: Arc<dyn LlmProvider>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            search,
            extractor,
            llm,
            settings,
        }
    }

    /// Search for the full text and for the stem, then collect useful sources.
    ///
    /// Search failures shrink the candidate list; a failed page extraction ends the
    /// scan. LLM failures other than [`LlmError::Unknown`] are returned.
    pub async fn collect(&self, question: &Question, raw: &str) -> Result<EvidenceSet, LlmError> {
        let by_full_text = self.search_hits(raw).await;
        let by_stem = self.search_hits(&question.stem).await;

        let candidates = match (by_full_text, by_stem) {
            (Some(a), Some(b)) => interleave(a, b),
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => Vec::new(),
        };

        tracing::debug!(candidates = candidates.len(), "source candidates merged");

        self.filter(&question.stem, candidates).await
    }

    async fn search_hits(&self, query: &str) -> Option<Vec<SearchHit>> {
        match self.search.search(query).await {
            Ok(mut hits) => {
                hits.truncate(self.settings.hits_per_query);
                Some(hits)
            }
            Err(e) => {
                tracing::warn!(
                    error = %crate::logging::redact_secrets(&e.to_string()),
                    "search failed, continuing without its results"
                );
                None
            }
        }
    }

    /// Walk the candidates in order until the quota is met, a fetch fails, or
    /// the list runs out.
    pub async fn filter(
        &self,
        stem: &str,
        candidates: Vec<SearchHit>,
    ) -> Result<EvidenceSet, LlmError> {
        let mut evidence = EvidenceSet::default();

        for hit in candidates {
            if evidence.len() >= self.settings.source_quota {
                break;
            }
            if evidence.already_checked(&hit.url) {
                continue;
            }

            let text = match self.extractor.extract(&hit.url).await {
                Ok(text) => text,
                Err(e) => {
                    // Later candidates are not attempted once one fetch fails.
                    tracing::info!(
                        url = %hit.url,
                        error = %e,
                        "page extraction failed, stopping source scan"
                    );
                    break;
                }
            };
            let excerpt = truncate_chars(&text, self.settings.excerpt_chars);

            let verdict = self.judge(stem, &excerpt).await?;
            evidence.checked.push(hit.url.clone());

            tracing::debug!(url = %hit.url, verdict = ?verdict, "source judged");

            if verdict == Verdict::Useful {
                evidence.sources.push(Evidence {
                    url: hit.url,
                    excerpt,
                });
            }
        }

        tracing::info!(
            accepted = evidence.len(),
            checked = evidence.checked.len(),
            "source scan finished"
        );

        Ok(evidence)
    }

    async fn judge(&self, stem: &str, excerpt: &str) -> Result<Verdict, LlmError> {
        match self.llm.complete(&prompts::relevance(stem, excerpt)).await {
            Ok(reply) => Ok(Verdict::from_reply(&reply)),
            Err(LlmError::Unknown { .. }) => Ok(Verdict::Unknown),
            Err(e) => Err(e),
        }
    }
}
