use crate::answer::AnswerReconciler;
use crate::config::Config;
use crate::error::AppError;
use crate::extract::{HttpPageExtractor, PageExtractor};
use crate::llm::{LlmProvider, YandexGptClient};
use crate::pipeline::SourcePipeline;
use crate::question::Question;
use crate::search::{SearchProvider, YandexSearchProvider};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inbound request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub id: i64,
    pub query: String,
}

/// Response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerResult {
    pub id: i64,
    pub answer: Option<String>,
    pub reasoning: String,
    pub sources: Vec<String>,
}

/// Answers one question end to end. Holds no per-request state.
pub struct QaService {
    pipeline: SourcePipeline,
    reconciler: AnswerReconciler,
}

impl QaService {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        extractor: Arc<dyn PageExtractor>,
        llm: Arc<dyn LlmProvider>,
        config: &Config,
    ) -> Self {
        Self {
            pipeline: SourcePipeline::new(search, extractor, llm.clone(), config.pipeline),
            reconciler: AnswerReconciler::new(llm),
        }
    }

    /// Wire up the Yandex-backed providers from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let search: Arc<dyn SearchProvider> = Arc::new(YandexSearchProvider::new(config)?);
        let extractor: Arc<dyn PageExtractor> = Arc::new(HttpPageExtractor::new(config)?);
        let llm: Arc<dyn LlmProvider> = Arc::new(YandexGptClient::new(config)?);
        Ok(Self::new(search, extractor, llm, config))
    }

    pub async fn handle(&self, request: QueryRequest) -> Result<AnswerResult, AppError> {
        let question = Question::parse(&request.query);

        tracing::info!(
            has_options = question.has_options(),
            "question received"
        );

        let evidence = self.pipeline.collect(&question, &request.query).await?;
        let reconciled = self.reconciler.answer(&question, &evidence).await?;

        tracing::info!(
            answer = ?reconciled.answer,
            sources = evidence.len(),
            "question answered"
        );

        Ok(AnswerResult {
            id: request.id,
            answer: reconciled.answer,
            reasoning: reconciled.reasoning,
            sources: evidence.urls(),
        })
    }
}
