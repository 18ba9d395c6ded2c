//! Crawler module for discovering and saving blog posts
//!
//! This module contains the core backup logic, including:
//! - Infinite-scroll link discovery on listing pages
//! - Section-aware worklist aggregation
//! - Per-post materialization and image localization
//! - Overall run coordination

mod aggregator;
mod assets;
mod context;
mod coordinator;
mod discovery;
mod fetcher;
mod materializer;

pub use aggregator::{
    crawl_listings, discover_blog_feed, find_sections, merge_listings, ListingLinks,
};
pub use assets::{image_sources, localize_images, resolve_image, LocalizedContent};
pub use context::RunContext;
pub use coordinator::Coordinator;
pub use discovery::{discover_posts, Discovery, LinkSet, ScrollPolicy, StopReason};
pub use fetcher::{build_http_client, AssetFetcher, FetchedAsset, HttpAssetFetcher};
pub use materializer::{materialize_post, PostOutcome};

use crate::model::RunSummary;
use crate::renderer::PageRenderer;
use crate::TeletypeError;

/// Runs a complete backup
///
/// This is the main entry point for a backup. It will:
/// 1. Capture the home page and blog identity
/// 2. Collect post links from the home feed and every section
/// 3. Save each post with its images
/// 4. Write the run summary
/// 5. Close the renderer
///
/// # Arguments
///
/// * `ctx` - The run context (blog, output layout, configuration)
/// * `renderer` - Page session used for every page of the blog
/// * `fetcher` - Image downloader
/// * `skip_sections` - Collect posts from the home feed only
///
/// # Returns
///
/// * `Ok(RunSummary)` - Backup completed
/// * `Err(TeletypeError)` - Backup failed
pub async fn run_backup<R, F>(
    ctx: RunContext,
    renderer: &mut R,
    fetcher: &F,
    skip_sections: bool,
) -> Result<RunSummary, TeletypeError>
where
    R: PageRenderer + ?Sized,
    F: AssetFetcher + ?Sized,
{
    Coordinator::new(ctx, renderer, fetcher)
        .skip_sections(skip_sections)
        .run()
        .await
}
