//! Markdown document form of a post
//!
//! The document is a front-matter block followed by the post body exactly
//! as extracted (HTML is valid Markdown):
//!
//! ```text
//! ---
//! title: "My post"
//! date: "March 3, 2024"
//! author: "Titanida"
//! url: "https://titanida.com/my-post"
//! slug: "my-post"
//! ---
//!
//! <div class="article__content">…</div>
//! ```

use crate::model::PostRecord;

/// Renders the Markdown document of a post
///
/// `title`, `date` and `author` lines are only written when known; `url`
/// and `slug` are always present.
pub fn render_document(record: &PostRecord) -> String {
    let mut md = String::from("---\n");

    if let Some(title) = &record.title {
        push_field(&mut md, "title", title);
    }
    if let Some(date) = &record.date {
        push_field(&mut md, "date", date);
    }
    if let Some(author) = &record.author {
        push_field(&mut md, "author", author);
    }
    push_field(&mut md, "url", &record.url);
    push_field(&mut md, "slug", &record.slug);

    md.push_str("---\n\n");

    if let Some(content) = &record.content {
        md.push_str(content);
    }

    md
}

fn push_field(md: &mut String, key: &str, value: &str) {
    md.push_str(&format!("{}: \"{}\"\n", key, quote(value)));
}

fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
