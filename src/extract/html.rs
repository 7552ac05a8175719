use html_scraper::{ElementRef, Html, Selector};

/// Extract the main text of an HTML document.
///
/// First match wins: the first `<article>`, the first `<main>`, then all `<p>`
/// elements joined with spaces. Returns `None` when none of these exist.
pub fn extract_main_text(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    for region in ["article", "main"] {
        if let Some(el) = first(&doc, region) {
            return Some(element_text(el));
        }
    }

    let sel = Selector::parse("p").ok()?;
    let paragraphs: Vec<String> = doc
        .select(&sel)
        .map(element_text)
        .collect();

    if paragraphs.is_empty() {
        return None;
    }
    Some(paragraphs.join(" "))
}

fn first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `max_chars` characters of `text` (never splits a code point).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
