//! Extraction of a single post page

use crate::extract::strategy::{first_match, Strategy};
use crate::model::BlogIdentity;
use scraper::Html;

/// Token the platform puts between a post title and the blog name in
/// headings and `<title>`
pub const TITLE_SEPARATOR: &str = " — ";

const TITLE: [Strategy<'static>; 3] = [
    Strategy::Text(".article__title"),
    Strategy::TextBeforeSeparator("h1"),
    Strategy::TextBeforeSeparator("title"),
];

const DATE: [Strategy<'static>; 1] = [Strategy::Text(".article__date")];

const BODY: [Strategy<'static>; 4] = [
    Strategy::OuterHtml(".article__content"),
    Strategy::OuterHtml("article"),
    Strategy::OuterHtml(".post-content"),
    Strategy::OuterHtml(".entry-content"),
];

/// Fields extracted from a rendered post page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPost {
    pub title: Option<String>,
    pub date: Option<String>,
    pub author: Option<String>,

    /// Outer markup of the body element, as rendered
    pub content: Option<String>,
}

/// Extracts title, date, author and body from a post page
///
/// The blog title stands in for the author when the page names none.
pub fn extract_post(html: &str, identity: &BlogIdentity) -> ExtractedPost {
    let document = Html::parse_document(html);

    let author = [
        Strategy::Text(".article__authorName"),
        Strategy::Value(identity.title.as_deref()),
    ];

    ExtractedPost {
        title: first_match(&document, &TITLE),
        date: first_match(&document, &DATE),
        author: first_match(&document, &author),
        content: first_match(&document, &BODY),
    }
}
