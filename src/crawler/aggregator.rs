//! Section-aware post aggregation
//!
//! Some posts are only reachable through a section of the blog, so the
//! worklist is the union of the home feed and every section feed, in
//! first-seen order.

use crate::crawler::context::RunContext;
use crate::crawler::discovery::{discover_posts, LinkSet, ScrollPolicy};
use crate::extract::extract_sections;
use crate::model::{BlogIdentity, Section};
use crate::output::{log_elapsed, SECTIONS_FILE};
use crate::renderer::PageRenderer;
use crate::TeletypeError;

/// Discovery result of one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingLinks {
    /// `None` for the home feed
    pub section: Option<String>,
    pub links: Vec<String>,
}

/// Loads the blog home page and records its section navigation
///
/// Writes `sections.json` (possibly an empty list).
pub async fn find_sections<R: PageRenderer + ?Sized>(
    renderer: &mut R,
    ctx: &RunContext,
) -> Result<Vec<Section>, TeletypeError> {
    let markup = renderer.navigate(ctx.root.as_str()).await?;
    let sections = extract_sections(&markup, &ctx.root);

    for section in &sections {
        tracing::debug!("Section: {} ({})", section.name, section.url);
    }

    ctx.layout.write_json(SECTIONS_FILE, &sections)?;
    log_elapsed(ctx.started, &format!("Found {} sections", sections.len()));

    Ok(sections)
}

/// Runs discovery on the home feed and then on every section
///
/// A listing that cannot be rendered is logged and contributes nothing;
/// the other listings are still crawled.
pub async fn crawl_listings<R: PageRenderer + ?Sized>(
    renderer: &mut R,
    ctx: &RunContext,
    sections: &[Section],
) -> Vec<ListingLinks> {
    let policy = ScrollPolicy::section(&ctx.config.discovery);
    let mut listings = Vec::with_capacity(sections.len() + 1);

    let targets = std::iter::once((None, ctx.root.as_str())).chain(
        sections
            .iter()
            .map(|section| (Some(section.name.as_str()), section.url.as_str())),
    );

    for (name, url) in targets {
        let label = name.unwrap_or("main page");
        tracing::info!("Collecting posts from {}", label);

        match discover_posts(renderer, &ctx.root, url, &policy).await {
            Ok(discovery) => {
                log_elapsed(
                    ctx.started,
                    &format!("Found {} posts in {}", discovery.links.len(), label),
                );
                listings.push(ListingLinks {
                    section: name.map(str::to_string),
                    links: discovery.links,
                });
            }
            Err(e) => {
                tracing::error!("Error collecting posts from {} ({}): {}", label, url, e);
            }
        }
    }

    listings
}

/// Unions listing results, keeping the first occurrence of each URL
pub fn merge_listings(listings: Vec<ListingLinks>) -> Vec<String> {
    let mut merged = LinkSet::new();
    for listing in listings {
        merged.extend(listing.links);
    }
    merged.into_vec()
}

/// Collects the worklist from the home feed alone, ignoring sections
///
/// Scrolls until the advertised post count is reached.
pub async fn discover_blog_feed<R: PageRenderer + ?Sized>(
    renderer: &mut R,
    ctx: &RunContext,
    identity: &BlogIdentity,
) -> Result<Vec<String>, TeletypeError> {
    let policy = ScrollPolicy::blog(&ctx.config.discovery, identity.post_count);
    let discovery = discover_posts(renderer, &ctx.root, ctx.root.as_str(), &policy).await?;

    if let Some(expected) = identity.post_count {
        if discovery.links.len() < expected as usize {
            tracing::warn!(
                "Blog advertises {} posts but only {} were found",
                expected,
                discovery.links.len()
            );
        }
    }

    log_elapsed(
        ctx.started,
        &format!("Found {} post URLs", discovery.links.len()),
    );

    Ok(discovery.links)
}
