//! Ordered extraction strategies
//!
//! A field is extracted by walking its strategy list and keeping the first
//! present value. Adding or reordering a fallback only touches the list.

use crate::extract::post::TITLE_SEPARATOR;
use scraper::{ElementRef, Html, Selector};

/// One way of producing a field value from a document
#[derive(Debug, Clone, Copy)]
pub enum Strategy<'a> {
    /// Trimmed text of the first element matching the selector
    Text(&'static str),

    /// Like `Text`, keeping only what precedes the first title separator
    TextBeforeSeparator(&'static str),

    /// Outer markup of the first element matching the selector, provided
    /// it has any inner markup
    OuterHtml(&'static str),

    /// A value known before looking at the document
    Value(Option<&'a str>),
}

impl Strategy<'_> {
    /// Applies this strategy to a document; empty results count as absent
    pub fn apply(&self, document: &Html) -> Option<String> {
        let value = match *self {
            Strategy::Text(css) => select_first(document, css).map(|el| element_text(&el)),
            Strategy::TextBeforeSeparator(css) => select_first(document, css)
                .map(|el| before_separator(&element_text(&el)).to_string()),
            Strategy::OuterHtml(css) => select_first(document, css)
                .filter(|el| !el.inner_html().trim().is_empty())
                .map(|el| el.html()),
            Strategy::Value(value) => value.map(|v| v.trim().to_string()),
        };

        value.filter(|v| !v.is_empty())
    }
}

/// Returns the value of the first strategy that yields one
pub fn first_match(document: &Html, strategies: &[Strategy<'_>]) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy.apply(document))
}

/// Finds the first element matching a CSS selector
///
/// An unparsable selector matches nothing.
pub(crate) fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// Concatenated, trimmed text content of an element
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn before_separator(text: &str) -> &str {
    match text.split_once(TITLE_SEPARATOR) {
        Some((left, _)) => left.trim(),
        None => text,
    }
}
