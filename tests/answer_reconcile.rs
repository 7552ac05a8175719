//! Answer selection, justification, and reconciliation

mod common;

use common::{PromptKind, ScriptedLlm};
use qa::answer::AnswerReconciler;
use qa::llm::LlmError;
use qa::pipeline::{Evidence, EvidenceSet};
use qa::prompts::{ATTRIBUTION_SUFFIX, UNKNOWN_REPLY};
use qa::question::Question;
use std::sync::Arc;

fn evidence() -> EvidenceSet {
    EvidenceSet {
        sources: vec![Evidence {
            url: "https://itmo.ru/news".to_string(),
            excerpt: "В 2009 году ИТМО получил статус национального исследовательского университета".to_string(),
        }],
        checked: vec!["https://itmo.ru/news".to_string()],
    }
}

#[tokio::test]
async fn agreeing_calls_keep_the_selection() {
    let llm = Arc::new(ScriptedLlm::quiz("2", "2, цитата: «В 2009 году...»"));
    let question = Question::parse(&common::itmo_question());

    let result = AnswerReconciler::new(llm.clone())
        .answer(&question, &evidence())
        .await
        .unwrap();

    assert_eq!(result.answer.as_deref(), Some("2"));
    assert_eq!(
        result.reasoning,
        format!("2, цитата: «В 2009 году...»{ATTRIBUTION_SUFFIX}")
    );
    assert_eq!(llm.count(PromptKind::Selection), 1);
    assert_eq!(llm.count(PromptKind::Justification), 1);
}

#[tokio::test]
async fn justification_digit_overrides_selection() {
    let llm = Arc::new(ScriptedLlm::quiz("2", "3 because the decree was signed in 2011"));
    let question = Question::parse(&common::itmo_question());

    let result = AnswerReconciler::new(llm)
        .answer(&question, &evidence())
        .await
        .unwrap();

    assert_eq!(result.answer.as_deref(), Some("3"));
}

#[tokio::test]
async fn non_digit_justification_keeps_selection() {
    let llm = Arc::new(ScriptedLlm::quiz("2", "Правильный ответ 3"));
    let question = Question::parse(&common::itmo_question());

    let result = AnswerReconciler::new(llm)
        .answer(&question, &evidence())
        .await
        .unwrap();

    assert_eq!(result.answer.as_deref(), Some("2"));
}

#[tokio::test]
async fn no_options_skips_selection() {
    let llm = Arc::new(ScriptedLlm::quiz("2", "4 года назад, судя по источникам"));
    let question = Question::parse("Привет! Как тебя зовут?");

    let result = AnswerReconciler::new(llm.clone())
        .answer(&question, &EvidenceSet::default())
        .await
        .unwrap();

    assert_eq!(result.answer, None);
    assert!(result.reasoning.ends_with(ATTRIBUTION_SUFFIX));
    assert_eq!(llm.count(PromptKind::Selection), 0);
    assert_eq!(llm.prompts().len(), 1);
}

#[tokio::test]
async fn prompts_carry_stem_options_and_evidence() {
    let llm = Arc::new(ScriptedLlm::quiz("2", "2"));
    let question = Question::parse(&common::itmo_question());

    AnswerReconciler::new(llm.clone())
        .answer(&question, &evidence())
        .await
        .unwrap();

    for prompt in llm.prompts() {
        assert!(prompt.contains(common::ITMO_STEM));
        assert!(prompt.contains(common::ITMO_OPTIONS));
        assert!(prompt.contains("[1] В 2009 году"));
        assert!(prompt.contains("\"1\", \"2\", \"3\" или \"4\""));
    }
}

#[tokio::test]
async fn unknown_selection_takes_justification_digit() {
    let llm = Arc::new(ScriptedLlm::new(|prompt| match common::classify(prompt) {
        PromptKind::Selection => Err(LlmError::Unknown { status: 400 }),
        _ => Ok("2, потому что 2009".to_string()),
    }));
    let question = Question::parse(&common::itmo_question());

    let result = AnswerReconciler::new(llm)
        .answer(&question, &evidence())
        .await
        .unwrap();

    assert_eq!(result.answer.as_deref(), Some("2"));
}

#[tokio::test]
async fn unknown_justification_reads_as_dont_know() {
    let llm = Arc::new(ScriptedLlm::new(|prompt| match common::classify(prompt) {
        PromptKind::Justification => Err(LlmError::Unknown { status: 500 }),
        _ => Ok("2".to_string()),
    }));
    let question = Question::parse(&common::itmo_question());

    let result = AnswerReconciler::new(llm)
        .answer(&question, &evidence())
        .await
        .unwrap();

    assert_eq!(result.answer.as_deref(), Some("2"));
    assert_eq!(result.reasoning, format!("{UNKNOWN_REPLY}{ATTRIBUTION_SUFFIX}"));
}

#[tokio::test]
async fn malformed_reply_is_an_error() {
    let llm = Arc::new(ScriptedLlm::new(|_| {
        Err(LlmError::MalformedResponse("missing field `result`".to_string()))
    }));
    let question = Question::parse(&common::itmo_question());

    let err = AnswerReconciler::new(llm)
        .answer(&question, &evidence())
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::MalformedResponse(_)));
}
