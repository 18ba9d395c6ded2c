//! Records produced by a backup run
//!
//! Every type here is serialized as-is into the run directory, so field
//! names double as the JSON keys of `blog_info.json`, `sections.json`,
//! `post.json` and `backup_summary.json`.

use serde::{Deserialize, Serialize};

/// Identity of the blog, extracted once from its home page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogIdentity {
    pub title: Option<String>,
    pub username: Option<String>,
    pub post_count: Option<u32>,
    pub bio: Option<String>,
    pub url: String,
}

/// A named sub-feed of the blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub url: String,
}

/// One materialized post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub url: String,

    /// Name of the post directory under `posts/`
    pub slug: String,

    pub title: Option<String>,

    /// Publication date exactly as displayed on the page
    pub date: Option<String>,

    pub author: Option<String>,

    /// Outer markup of the post body, image sources rewritten to `assets/…`
    pub content: Option<String>,
}

/// Final counters of a run, written to `backup_summary.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub blog_url: String,
    pub domain: String,
    pub title: Option<String>,
    pub username: Option<String>,
    pub sections: usize,
    pub total_posts: usize,
    pub successful_downloads: usize,
    pub failed_downloads: usize,

    /// RFC 3339 timestamp of the end of the run
    pub backup_date: String,

    /// Wall-clock duration as `HH:MM:SS`
    pub elapsed_time: String,
}
