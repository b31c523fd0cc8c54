//! Main-content text extraction from HTML using the `scraper` crate.
//!
//! The container preference list is a heuristic for "main content" with no
//! guarantee of correctness: the first selector that matches anything wins,
//! and the whole `<body>` is the fallback. Script, style, and chrome
//! elements are skipped wherever they appear.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose subtrees never contribute content text.
const EXCLUDED_ELEMENTS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// Ordered preference list of likely main-content containers.
///
/// Best-effort heuristic, not a contract: pages that match none of these
/// fall back to the whole document body.
const CONTENT_SELECTORS: &[&str] = &["article", "main", ".content", ".post", ".entry"];

/// Extracts the main content text of an HTML document.
///
/// Tries each content selector in preference order; the first one with any
/// matching element supplies the text. When none match, or the match is
/// empty, the document body is used. Whitespace between text nodes is
/// collapsed to single spaces.
#[must_use]
pub(crate) fn extract_main_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut content = String::new();
    for name in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(name) else {
            continue;
        };
        let mut matched = false;
        let mut parts = Vec::new();
        for element in document.select(&selector) {
            matched = true;
            collect_text(element, &mut parts);
        }
        if matched {
            content = parts.join(" ");
            break;
        }
    }

    if content.trim().is_empty() {
        if let Ok(selector) = Selector::parse("body") {
            let mut parts = Vec::new();
            for element in document.select(&selector) {
                collect_text(element, &mut parts);
            }
            content = parts.join(" ");
        }
    }

    content
}

/// Walks an element subtree collecting trimmed text nodes, skipping
/// excluded elements and their entire subtrees.
fn collect_text(element: ElementRef<'_>, parts: &mut Vec<String>) {
    if EXCLUDED_ELEMENTS.contains(&element.value().name()) {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, parts);
                }
            }
            _ => {}
        }
    }
}
