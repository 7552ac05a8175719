//! Prompt templates and the fixed phrases the pipeline compares against.

use crate::pipeline::EvidenceSet;
use crate::question::Question;

/// Exact reply that marks a source as useful
pub const USEFUL_VERDICT: &str = "Да, полезна";

/// Reply used in place of text when the model gave no usable answer
pub const UNKNOWN_REPLY: &str = "Не знаю";

/// Appended to every reasoning text
pub const ATTRIBUTION_SUFFIX: &str = "\n\nОтвет сгенерирован моделью YandexGPT.";

/// Ask whether an excerpt helps answer the question; the model must reply
/// with [`USEFUL_VERDICT`] or "Нет".
pub fn relevance(stem: &str, excerpt: &str) -> String {
    format!(
        "Есть вопрос: {stem}. Полезна ли следующая информация для ответа на поставленный вопрос? \
         В ответ напиши \"{USEFUL_VERDICT}\", если информация полезна и \"Нет\", если не полезна.\n\
         Информация: {excerpt}"
    )
}

/// Ask for exactly one option number.
pub fn selection(question: &Question, evidence: &EvidenceSet) -> String {
    let options = question.options.as_deref().unwrap_or_default();
    format!(
        "Есть вопрос: {stem}. Есть ответы: {options}. Ответь на вопрос, выбрав один из вариантов: {choices}.\n\
         В качестве ответа верни ровно 1 число из набора, ни словом больше.\n\
         Дополнительная информация: {info}\n\
         Ответь на вопрос, не добавляя ссылки. Мне нужно только текстовое объяснение, без перенаправлений на другие сайты.",
        stem = question.stem,
        choices = choice_list(question),
        info = serialize_evidence(evidence),
    )
}

/// Ask for an option number plus a short rationale; for open questions, a short
/// answer plus rationale.
pub fn justification(question: &Question, evidence: &EvidenceSet) -> String {
    let info = serialize_evidence(evidence);
    match question.options.as_deref() {
        Some(options) => format!(
            "Есть вопрос: {stem}. Есть ответы: {options}. Ответь на вопрос, выбрав один из вариантов: {choices}.\n\
             В качестве ответа верни цифру и твое объяснение выбора, предпочтительно с цитатой из дополнительной информации (максимум 50 слов).\n\
             Дополнительная информация: {info}\n\
             Ответь на вопрос, не добавляя ссылки. Мне нужно только текстовое объяснение, без перенаправлений на другие сайты.",
            stem = question.stem,
            choices = choice_list(question),
        ),
        None => format!(
            "Есть вопрос: {stem}.\n\
             Дай краткий ответ и объяснение, предпочтительно с цитатой из дополнительной информации (максимум 50 слов).\n\
             Дополнительная информация: {info}\n\
             Ответь на вопрос, не добавляя ссылки. Мне нужно только текстовое объяснение, без перенаправлений на другие сайты.",
            stem = question.stem,
        ),
    }
}

/// `"1", "2", "3" или "4"` built from the option numbers actually present.
fn choice_list(question: &Question) -> String {
    let mut numbers = question.option_numbers();
    if numbers.is_empty() {
        numbers = (1..=4).map(|n| n.to_string()).collect();
    }

    let quoted: Vec<String> = numbers.iter().map(|n| format!("\"{n}\"")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} или {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

fn serialize_evidence(evidence: &EvidenceSet) -> String {
    if evidence.is_empty() {
        return "нет".to_string();
    }
    evidence
        .sources
        .iter()
        .enumerate()
        .map(|(idx, source)| format!("[{}] {}", idx + 1, source.excerpt))
        .collect::<Vec<_>>()
        .join("\n")
}
