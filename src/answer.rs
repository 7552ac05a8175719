//! Answer selection, justification, and reconciliation of the two.

use crate::llm::{LlmError, LlmProvider};
use crate::pipeline::EvidenceSet;
use crate::prompts;
use crate::question::Question;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub answer: Option<String>,
    pub reasoning: String,
}

/// Apply the justification's leading digit over the provisional answer.
///
/// If the justification starts with a digit that differs from the provisional
/// answer, that digit wins. No provisional answer stays `None`.
pub fn reconcile(provisional: Option<String>, justification: &str) -> Option<String> {
    let provisional = provisional?;
    match justification.chars().next() {
        Some(c) if c.is_ascii_digit() && provisional != c.to_string() => Some(c.to_string()),
        _ => Some(provisional),
    }
}

pub struct AnswerReconciler {
    llm: Arc<dyn LlmProvider>,
}

impl AnswerReconciler {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Select an answer (options only) and always justify it.
    pub async fn answer(
        &self,
        question: &Question,
        evidence: &EvidenceSet,
    ) -> Result<Reconciled, LlmError> {
        let provisional = if question.has_options() {
            match self.llm.complete(&prompts::selection(question, evidence)).await {
                Ok(reply) => Some(reply),
                Err(LlmError::Unknown { status }) => {
                    tracing::warn!(status, "answer selection returned no answer");
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let justification = match self
            .llm
            .complete(&prompts::justification(question, evidence))
            .await
        {
            Ok(text) => text,
            Err(LlmError::Unknown { status }) => {
                tracing::warn!(status, "answer justification returned no text");
                prompts::UNKNOWN_REPLY.to_string()
            }
            Err(e) => return Err(e),
        };

        let answer = if question.has_options() {
            match provisional {
                Some(p) => reconcile(Some(p), &justification),
                None => leading_digit(&justification),
            }
        } else {
            None
        };

        tracing::debug!(answer = ?answer, "answer reconciled");

        Ok(Reconciled {
            answer,
            reasoning: format!("{justification}{}", prompts::ATTRIBUTION_SUFFIX),
        })
    }
}

fn leading_digit(text: &str) -> Option<String> {
    text.chars()
        .next()
        .filter(|c| c.is_ascii_digit())
        .map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differing_digit_overrides() {
        assert_eq!(
            reconcile(Some("2".into()), "3 because the source says so"),
            Some("3".into())
        );
    }

    #[test]
    fn same_digit_keeps_provisional() {
        assert_eq!(reconcile(Some("2".into()), "2, цитата..."), Some("2".into()));
    }

    #[test]
    fn non_digit_keeps_provisional() {
        assert_eq!(
            reconcile(Some("2".into()), "Ответ 3, потому что..."),
            Some("2".into())
        );
        assert_eq!(reconcile(Some("2".into()), ""), Some("2".into()));
    }

    #[test]
    fn provisional_text_is_compared_whole() {
        // A verbose selection reply still loses to a digit-led justification.
        assert_eq!(
            reconcile(Some("Ответ: 2".into()), "2 - верно"),
            Some("2".into())
        );
    }

    #[test]
    fn nothing_to_override() {
        assert_eq!(reconcile(None, "3 because"), None);
    }

    #[test]
    fn leading_digit_only_ascii() {
        assert_eq!(leading_digit("4. Санкт-Петербург"), Some("4".into()));
        assert_eq!(leading_digit("Не знаю"), None);
    }
}
