//! Extraction of blog-level data from listing pages

use crate::extract::strategy::{element_text, first_match, Strategy};
use crate::model::{BlogIdentity, Section};
use crate::url::BlogRoot;
use scraper::{Html, Selector};
use std::collections::HashSet;

const BLOG_TITLE: &str = ".blog__info_name_text";
const BLOG_USERNAME: &str = ".blog__info_username";
const BLOG_POST_COUNT: &str = ".blog__info_items .blog__info_item:nth-child(3)";
const BLOG_BIO: &str = ".blog__info_bio";
const SECTION_ITEM: &str = ".blog__section_item";
const ARTICLE_CARD: &str = ".articleCard";
const ARTICLE_CARD_LINK: &str = ".articleCard-title a";

/// Extracts the blog identity from the rendered home page
///
/// # Example
///
/// ```
/// use teletype_backup::extract::extract_blog_identity;
/// use teletype_backup::url::BlogRoot;
///
/// let html = r#"<div class="blog__info_name_text">Titanida</div>
///               <div class="blog__info_username">@titanida</div>"#;
/// let root = BlogRoot::parse("https://titanida.com").unwrap();
/// let identity = extract_blog_identity(html, &root);
/// assert_eq!(identity.title.as_deref(), Some("Titanida"));
/// assert_eq!(identity.username.as_deref(), Some("titanida"));
/// ```
pub fn extract_blog_identity(html: &str, root: &BlogRoot) -> BlogIdentity {
    let document = Html::parse_document(html);

    let username = first_match(&document, &[Strategy::Text(BLOG_USERNAME)]).and_then(|name| {
        let stripped = name.strip_prefix('@').unwrap_or(&name).trim().to_string();
        (!stripped.is_empty()).then_some(stripped)
    });

    let post_count =
        first_match(&document, &[Strategy::Text(BLOG_POST_COUNT)]).and_then(|t| parse_post_count(&t));

    BlogIdentity {
        title: first_match(&document, &[Strategy::Text(BLOG_TITLE)]),
        username,
        post_count,
        bio: first_match(&document, &[Strategy::Text(BLOG_BIO)]),
        url: root.as_str().to_string(),
    }
}

/// Parses the first run of decimal digits in a text such as `"42 posts"`
pub fn parse_post_count(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

/// Extracts the section navigation of a blog
///
/// Links that resolve to the blog root (or are empty) are not sections.
/// The result is deduplicated by URL, keeping the first occurrence.
pub fn extract_sections(html: &str, root: &BlogRoot) -> Vec<Section> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse(SECTION_ITEM) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut sections = Vec::new();

    for link in document.select(&selector) {
        let Some(href) = link.value().attr("href").map(str::trim) else {
            continue;
        };

        if href.is_empty() || href == "/" {
            continue;
        }

        let Some(url) = root.resolve(href) else {
            continue;
        };

        if root.is_root(&url) || !seen.insert(url.clone()) {
            continue;
        }

        sections.push(Section {
            name: element_text(&link),
            url,
        });
    }

    sections
}

/// Extracts the post links visible on a listing page, in page order
///
/// Cards without a resolvable title link are skipped.
pub fn extract_post_links(html: &str, root: &BlogRoot) -> Vec<String> {
    let document = Html::parse_document(html);
    let (Ok(card_selector), Ok(link_selector)) = (
        Selector::parse(ARTICLE_CARD),
        Selector::parse(ARTICLE_CARD_LINK),
    ) else {
        return Vec::new();
    };

    document
        .select(&card_selector)
        .filter_map(|card| card.select(&link_selector).next())
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| root.resolve(href))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> BlogRoot {
        BlogRoot::parse("https://titanida.com").unwrap()
    }

    const HOME: &str = r#"
        <html><body>
          <div class="blog__info">
            <div class="blog__info_name_text"> Titanida </div>
            <div class="blog__info_username">@titanida</div>
            <div class="blog__info_items">
              <div class="blog__info_item">12 followers</div>
              <div class="blog__info_item">3 following</div>
              <div class="blog__info_item">137 posts</div>
            </div>
            <div class="blog__info_bio">Notes on travel.</div>
          </div>
          <nav>
            <a class="blog__section_item" href="/">All</a>
            <a class="blog__section_item" href="https://titanida.com/">Home</a>
            <a class="blog__section_item" href="/travel"> Travel </a>
            <a class="blog__section_item" href="food">Food</a>
            <a class="blog__section_item" href="/travel">Travel again</a>
            <a class="blog__section_item">No link</a>
          </nav>
        </body></html>
    "#;

    #[test]
    fn test_blog_identity() {
        let identity = extract_blog_identity(HOME, &root());

        assert_eq!(identity.title.as_deref(), Some("Titanida"));
        assert_eq!(identity.username.as_deref(), Some("titanida"));
        assert_eq!(identity.post_count, Some(137));
        assert_eq!(identity.bio.as_deref(), Some("Notes on travel."));
        assert_eq!(identity.url, "https://titanida.com");
    }

    #[test]
    fn test_username_without_marker_is_kept() {
        let html = r#"<div class="blog__info_username">titanida</div>"#;
        let identity = extract_blog_identity(html, &root());
        assert_eq!(identity.username.as_deref(), Some("titanida"));
    }

    #[test]
    fn test_blog_identity_all_absent() {
        let identity = extract_blog_identity("<html><body></body></html>", &root());
        assert_eq!(
            identity,
            BlogIdentity {
                url: "https://titanida.com".to_string(),
                ..BlogIdentity::default()
            }
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(
            extract_blog_identity(HOME, &root()),
            extract_blog_identity(HOME, &root())
        );
        assert_eq!(extract_sections(HOME, &root()), extract_sections(HOME, &root()));
    }

    #[test]
    fn test_parse_post_count() {
        assert_eq!(parse_post_count("137 posts"), Some(137));
        assert_eq!(parse_post_count("Posts: 42, drafts: 3"), Some(42));
        assert_eq!(parse_post_count("no posts"), None);
        assert_eq!(parse_post_count(""), None);
    }

    #[test]
    fn test_sections_skip_root_and_duplicates() {
        let sections = extract_sections(HOME, &root());

        assert_eq!(
            sections,
            vec![
                Section {
                    name: "Travel".to_string(),
                    url: "https://titanida.com/travel".to_string(),
                },
                Section {
                    name: "Food".to_string(),
                    url: "https://titanida.com/food".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_post_links() {
        let html = r#"
            <div class="articleCard">
              <div class="articleCard-title"><a href="/first">First</a></div>
            </div>
            <div class="articleCard">
              <div class="articleCard-title"><a>No href</a></div>
            </div>
            <div class="articleCard"><p>No title link</p></div>
            <div class="articleCard">
              <div class="articleCard-title"><a href="https://titanida.com/second">Second</a></div>
            </div>
            <a href="/not-a-card">Elsewhere</a>
        "#;

        assert_eq!(
            extract_post_links(html, &root()),
            vec![
                "https://titanida.com/first".to_string(),
                "https://titanida.com/second".to_string(),
            ]
        );
    }

    #[test]
    fn test_post_links_empty_page() {
        assert!(extract_post_links("<html></html>", &root()).is_empty());
    }
}
