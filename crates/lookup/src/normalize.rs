//! Markup normalizer
//!
//! Extracts the pronunciation, word-form, gloss, and sense sections from a
//! raw dictionary page and renders them as one markdown document. The
//! upstream markup schema is not stable, so every section is extracted
//! independently and an absent section renders as an empty segment.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

/// Country marker class to flag emoji
const COUNTRY_FLAGS: [(&str, &str); 2] = [
    ("us-flag-icon", "\u{1f1fa}\u{1f1f8}"),
    ("uk-flag-icon", "\u{1f1ec}\u{1f1e7}"),
];

struct Selectors {
    word_area: Selector,
    ipa_entry: Selector,
    word_form: Selector,
    short: Selector,
    long: Selector,
    word_definitions: Selector,
    sense: Selector,
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    word_area: sel("#pageContent .definition-columns .word-area"),
    ipa_entry: sel(".ipa-section .ipa-with-audio"),
    word_form: sel(".word-forms b"),
    short: sel(".short"),
    long: sel(".long"),
    word_definitions: sel("#pageContent .definition-columns .col-1 .word-definitions"),
    sense: sel("ol > li > .definition"),
});

fn sel(source: &str) -> Selector {
    Selector::parse(source).expect("static selector")
}

fn country_flag(class: &str) -> Option<&'static str> {
    COUNTRY_FLAGS
        .iter()
        .find(|(marker, _)| *marker == class)
        .map(|(_, flag)| *flag)
}

/// Render a raw dictionary page into the canonical definition document
///
/// Deterministic: the same input always yields the same document. Sections
/// missing from the page render as empty segments, never errors.
pub fn normalize(word: &str, html: &str) -> String {
    let s = &*SELECTORS;
    let page = Html::parse_document(html);
    let word_area = page.select(&s.word_area).next();

    let mut ipa_line = String::new();
    let mut forms_line = String::from("Other forms:");
    let mut short_gloss = String::new();
    let mut long_gloss = String::new();

    if let Some(area) = word_area {
        for entry in area.select(&s.ipa_entry) {
            let children: Vec<ElementRef> =
                entry.children().filter_map(ElementRef::wrap).collect();
            let flag = children
                .first()
                .and_then(|el| el.value().attr("class"))
                .and_then(country_flag)
                .unwrap_or("");
            let ipa = element_text(children.last());
            ipa_line.push_str(&format!("&nbsp;{}&nbsp;{}&nbsp;", flag, ipa));
        }

        for form in area.select(&s.word_form) {
            let text: String = form.text().collect();
            forms_line.push_str(&format!("&nbsp;**{}**", text.trim()));
        }

        short_gloss = element_text(area.select(&s.short).next().as_ref());
        long_gloss = element_text(area.select(&s.long).next().as_ref());
    }

    let mut senses = String::new();
    if let Some(definitions) = page.select(&s.word_definitions).next() {
        for sense in definitions.select(&s.sense) {
            for child in sense.children() {
                match child.value() {
                    Node::Element(_) => {
                        if let Some(el) = ElementRef::wrap(child) {
                            let label: String = el.text().collect();
                            senses.push_str(&format!("***{}***&nbsp;", label.trim()));
                        }
                    }
                    Node::Text(text) => {
                        let text = text.trim();
                        if !text.is_empty() {
                            senses.push_str(&format!("{}\n\n", text));
                        }
                    }
                    other => {
                        warn!("unrecognized node in sense definition: {:?}", other);
                    }
                }
            }
        }
    }

    format!(
        "## {}\n{}\n\n{}\n\n{}\n\n{}\n\n{}",
        word, ipa_line, forms_line, short_gloss, long_gloss, senses
    )
}

fn element_text(element: Option<&ElementRef>) -> String {
    element
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT_PAGE: &str = r#"<html><body><div id="pageContent">
<div class="definition-columns">
  <div class="word-area">
    <div class="ipa-section">
      <div class="ipa-with-audio"><span class="us-flag-icon"></span><span class="ipa">/k&aelig;t/</span></div>
      <div class="ipa-with-audio"><span class="uk-flag-icon"></span><span class="ipa">/kat/</span></div>
    </div>
    <div class="word-forms">Forms: <b>cats</b>; <b>catting</b></div>
    <p class="short">A cat is a furry pet.</p>
    <p class="long">A cat is a small domesticated feline kept as a pet.</p>
  </div>
  <div class="col-1">
    <div class="word-definitions">
      <ol>
        <li><div class="definition"><em>noun</em> feline mammal usually having thick soft fur</div></li>
        <li><div class="definition"><em>verb</em> beat with a cat-o'-nine-tails</div></li>
      </ol>
    </div>
  </div>
</div>
</div></body></html>"#;

    #[test]
    fn test_normalize_full_page() {
        let doc = normalize("cat", CAT_PAGE);

        assert!(doc.starts_with("## cat\n"));
        assert!(doc.contains("\u{1f1fa}\u{1f1f8}&nbsp;/k\u{e6}t/"));
        assert!(doc.contains("\u{1f1ec}\u{1f1e7}&nbsp;/kat/"));
        assert!(doc.contains("Other forms:&nbsp;**cats**&nbsp;**catting**"));
        assert!(doc.contains("A cat is a furry pet."));
        assert!(doc.contains("A cat is a small domesticated feline kept as a pet."));
        assert!(doc.contains("***noun***&nbsp;feline mammal usually having thick soft fur\n\n"));
        assert!(doc.contains("***verb***&nbsp;beat with a cat-o'-nine-tails\n\n"));
    }

    #[test]
    fn test_section_order() {
        let doc = normalize("cat", CAT_PAGE);

        let ipa = doc.find("/kat/").unwrap();
        let forms = doc.find("Other forms:").unwrap();
        let short = doc.find("furry pet").unwrap();
        let long = doc.find("domesticated feline").unwrap();
        let senses = doc.find("***noun***").unwrap();

        assert!(ipa < forms);
        assert!(forms < short);
        assert!(short < long);
        assert!(long < senses);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalize("cat", CAT_PAGE);
        let second = normalize("cat", CAT_PAGE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_page_degrades_gracefully() {
        let doc = normalize("ghost", "<html><body></body></html>");

        assert!(doc.starts_with("## ghost\n"));
        assert!(doc.contains("Other forms:"));
    }

    #[test]
    fn test_missing_pronunciation_section() {
        let page = r#"<html><body><div id="pageContent">
<div class="definition-columns">
  <div class="word-area">
    <p class="short">Only a short gloss here.</p>
  </div>
</div>
</div></body></html>"#;

        let doc = normalize("stub", page);
        assert!(doc.contains("Only a short gloss here."));
        assert!(!doc.contains("\u{1f1fa}\u{1f1f8}"));
    }

    #[test]
    fn test_unknown_country_marker_renders_without_flag() {
        let page = r#"<html><body><div id="pageContent">
<div class="definition-columns">
  <div class="word-area">
    <div class="ipa-section">
      <div class="ipa-with-audio"><span class="au-flag-icon"></span><span class="ipa">/ka:t/</span></div>
    </div>
  </div>
</div>
</div></body></html>"#;

        let doc = normalize("cart", page);
        assert!(doc.contains("&nbsp;&nbsp;/ka:t/&nbsp;"));
    }
}
