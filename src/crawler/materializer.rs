//! Post materialization
//!
//! Turns one worklist entry into its on-disk form:
//!
//! ```text
//! posts/<slug>/
//!   original.html   rendered page, as captured
//!   index.md        front matter + body
//!   post.json       PostRecord
//!   assets/         downloaded images
//! ```
//!
//! Every failure is contained to the post it happened in.

use crate::crawler::assets::localize_images;
use crate::crawler::context::RunContext;
use crate::crawler::fetcher::AssetFetcher;
use crate::extract::extract_post;
use crate::model::{BlogIdentity, PostRecord};
use crate::output::render_document;
use crate::renderer::PageRenderer;
use crate::url::SlugAssignment;
use crate::TeletypeError;
use url::Url;

/// Result of materializing one post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    Saved,
    Failed,
}

impl PostOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PostOutcome::Saved)
    }
}

/// Renders, extracts and writes one post
///
/// Never fails: any error is logged and reported as
/// [`PostOutcome::Failed`], leaving whatever files were already written.
pub async fn materialize_post<R, F>(
    renderer: &mut R,
    fetcher: &F,
    ctx: &RunContext,
    identity: &BlogIdentity,
    assignment: &SlugAssignment,
) -> PostOutcome
where
    R: PageRenderer + ?Sized,
    F: AssetFetcher + ?Sized,
{
    match save_post(renderer, fetcher, ctx, identity, assignment).await {
        Ok(record) => {
            tracing::info!(
                "Saved post: {}",
                record.title.as_deref().unwrap_or(record.slug.as_str())
            );
            PostOutcome::Saved
        }
        Err(e) => {
            tracing::error!("Error downloading post {}: {}", assignment.url, e);
            PostOutcome::Failed
        }
    }
}

async fn save_post<R, F>(
    renderer: &mut R,
    fetcher: &F,
    ctx: &RunContext,
    identity: &BlogIdentity,
    assignment: &SlugAssignment,
) -> Result<PostRecord, TeletypeError>
where
    R: PageRenderer + ?Sized,
    F: AssetFetcher + ?Sized,
{
    let post_url = Url::parse(&assignment.url)?;
    let post_dir = ctx.layout.post_dir(&assignment.slug);
    post_dir.create()?;

    let html = renderer.navigate(&assignment.url).await?;
    post_dir.write_original(&html)?;

    let extracted = extract_post(&html, identity);

    let content = match extracted.content {
        Some(body) => {
            let localized = localize_images(&body, &post_url, &post_dir, fetcher).await?;
            if localized.failed > 0 {
                tracing::warn!(
                    "{} of {} images of {} were not downloaded",
                    localized.failed,
                    localized.failed + localized.downloaded,
                    assignment.url
                );
            }
            Some(localized.content)
        }
        None => {
            tracing::warn!("No content found for {}", assignment.url);
            None
        }
    };

    let record = PostRecord {
        url: assignment.url.clone(),
        slug: assignment.slug.clone(),
        title: extracted.title,
        date: extracted.date,
        author: extracted.author,
        content,
    };

    post_dir.write_document(&render_document(&record))?;
    post_dir.write_record(&record)?;

    Ok(record)
}
