//! Fixtures shared by the integration tests

use std::path::{Path, PathBuf};
use teletype_backup::config::Config;
use teletype_backup::crawler::{HttpAssetFetcher, RunContext};
use teletype_backup::output::RunLayout;
use teletype_backup::BlogRoot;
use tempfile::TempDir;

/// Configuration with no waiting between posts
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.backup.politeness_delay_ms = 0;
    config.fetcher.timeout_secs = 5;
    config
}

pub fn test_fetcher() -> HttpAssetFetcher {
    HttpAssetFetcher::new(&test_config().fetcher).expect("Failed to build fetcher")
}

/// Creates a run directory for `blog_url` inside `dir`
pub fn create_context(dir: &TempDir, blog_url: &str) -> RunContext {
    let root = BlogRoot::parse(blog_url).expect("Failed to parse blog URL");
    let layout = RunLayout::create(dir.path(), &root.domain(), chrono::Local::now())
        .expect("Failed to create run layout");
    RunContext::new(root, layout, test_config())
}

/// Home page with a blog header, section navigation and post cards
pub fn home_page(title: &str, post_count: usize, sections: &[(&str, &str)], posts: &[&str]) -> String {
    let nav: String = sections
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<a class="blog__section_item" href="{}">{}</a>"#,
                href, name
            )
        })
        .collect();

    format!(
        r#"<html><head><title>{title}</title></head><body>
<div class="blog__info">
  <div class="blog__info_name_text">{title}</div>
  <div class="blog__info_username">@{username}</div>
  <div class="blog__info_items">
    <div class="blog__info_item">12 followers</div>
    <div class="blog__info_item">3 following</div>
    <div class="blog__info_item">{post_count} posts</div>
  </div>
  <div class="blog__info_bio">Notes and poems</div>
</div>
<nav class="blog__sections"><a class="blog__section_item" href="/">All</a>{nav}</nav>
{cards}
</body></html>"#,
        title = title,
        username = title.to_lowercase(),
        post_count = post_count,
        nav = nav,
        cards = listing_cards(posts),
    )
}

/// Section page listing the given posts
pub fn section_page(posts: &[&str]) -> String {
    format!("<html><body>{}</body></html>", listing_cards(posts))
}

fn listing_cards(posts: &[&str]) -> String {
    posts
        .iter()
        .map(|href| {
            format!(
                r#"<div class="articleCard"><div class="articleCard-title"><a href="{}">Post</a></div></div>"#,
                href
            )
        })
        .collect()
}

/// Post page with every field present
pub fn full_post(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{title} — Blog</title></head><body>
<h1 class="article__title">{title}</h1>
<div class="article__date">March 3, 2024</div>
<div class="article__authorName">Anna</div>
<div class="article__content">{body}</div>
</body></html>"#,
        title = title,
        body = body
    )
}

/// Directory of a post inside the run
pub fn post_path(run_root: &Path, slug: &str) -> PathBuf {
    run_root.join("posts").join(slug)
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).expect("Failed to parse JSON")
}
