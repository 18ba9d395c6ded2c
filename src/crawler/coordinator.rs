//! Backup coordinator - main run orchestration logic
//!
//! This module drives one backup run through its phases:
//! - Init: home page capture and blog identity
//! - DiscoverSections / CrawlListings / Deduplicate: building the worklist
//! - MaterializeEach: one post at a time, failures contained per post
//! - Summarize: final counters
//!
//! Whatever happens, the run ends in Teardown, which releases the renderer
//! exactly once.

use crate::crawler::aggregator::{
    crawl_listings, discover_blog_feed, find_sections, merge_listings, ListingLinks,
};
use crate::crawler::context::RunContext;
use crate::crawler::fetcher::AssetFetcher;
use crate::crawler::materializer::materialize_post;
use crate::extract::extract_blog_identity;
use crate::model::{BlogIdentity, RunSummary, Section};
use crate::output::{
    build_summary, log_elapsed, RunCounters, BLOG_INFO_FILE, HOMEPAGE_FILE, POST_URLS_FILE,
    SUMMARY_FILE,
};
use crate::renderer::PageRenderer;
use crate::state::BackupPhase;
use crate::url::assign_slugs;
use crate::TeletypeError;
use std::time::Duration;

/// Drives a single backup run
///
/// The renderer and fetcher are lent for the duration of the run; the
/// renderer is closed when the run ends, successfully or not.
pub struct Coordinator<'r, R: PageRenderer + ?Sized, F: AssetFetcher + ?Sized> {
    ctx: RunContext,
    renderer: &'r mut R,
    fetcher: &'r F,
    phase: BackupPhase,
    skip_sections: bool,
}

impl<'r, R, F> Coordinator<'r, R, F>
where
    R: PageRenderer + ?Sized,
    F: AssetFetcher + ?Sized,
{
    /// Creates a coordinator in the `Init` phase
    pub fn new(ctx: RunContext, renderer: &'r mut R, fetcher: &'r F) -> Self {
        Self {
            ctx,
            renderer,
            fetcher,
            phase: BackupPhase::Init,
            skip_sections: false,
        }
    }

    /// Collects the worklist from the home feed only, targeting the
    /// advertised post count instead of visiting sections
    pub fn skip_sections(mut self, skip: bool) -> Self {
        self.skip_sections = skip;
        self
    }

    /// Runs every phase, then tears down
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - The run reached `Done`; individual posts may
    ///   still have failed
    /// * `Err(TeletypeError)` - A run-level step failed
    pub async fn run(mut self) -> Result<RunSummary, TeletypeError> {
        tracing::info!("Starting backup of {}", self.ctx.root);

        let result = self.run_phases().await;
        if let Err(e) = &result {
            tracing::error!("Backup failed during {}: {}", self.phase, e);
        }

        self.teardown().await;
        result
    }

    async fn run_phases(&mut self) -> Result<RunSummary, TeletypeError> {
        let identity = self.load_identity().await?;

        self.advance(BackupPhase::DiscoverSections)?;
        let sections = if self.skip_sections {
            tracing::info!("Skipping sections");
            Vec::new()
        } else {
            find_sections(&mut *self.renderer, &self.ctx).await?
        };

        self.advance(BackupPhase::CrawlListings)?;
        let listings = if self.skip_sections {
            let links = discover_blog_feed(&mut *self.renderer, &self.ctx, &identity).await?;
            vec![ListingLinks {
                section: None,
                links,
            }]
        } else {
            crawl_listings(&mut *self.renderer, &self.ctx, &sections).await
        };

        self.advance(BackupPhase::Deduplicate)?;
        let links = merge_listings(listings);
        self.ctx.layout.write_json(POST_URLS_FILE, &links)?;
        log_elapsed(
            self.ctx.started,
            &format!("Found {} unique posts", links.len()),
        );

        self.advance(BackupPhase::MaterializeEach)?;
        let counters = self.materialize_all(&identity, &links).await;

        self.advance(BackupPhase::Summarize)?;
        let summary = self.summarize(&identity, &sections, links.len(), counters)?;

        self.advance(BackupPhase::Done)?;
        Ok(summary)
    }

    /// Captures the home page and extracts the blog identity
    async fn load_identity(&mut self) -> Result<BlogIdentity, TeletypeError> {
        let markup = self.renderer.navigate(self.ctx.root.as_str()).await?;
        self.ctx.layout.write_text(HOMEPAGE_FILE, &markup)?;

        let identity = extract_blog_identity(&markup, &self.ctx.root);
        self.ctx.layout.write_json(BLOG_INFO_FILE, &identity)?;

        tracing::info!(
            "Blog: {} ({}), {} posts advertised",
            identity.title.as_deref().unwrap_or("untitled"),
            identity.username.as_deref().unwrap_or("no username"),
            identity
                .post_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );
        log_elapsed(self.ctx.started, "Blog info extracted");

        Ok(identity)
    }

    async fn materialize_all(&mut self, identity: &BlogIdentity, links: &[String]) -> RunCounters {
        let assignments = assign_slugs(links);
        let total = assignments.len();
        let delay = Duration::from_millis(self.ctx.config.backup.politeness_delay_ms);
        let mut counters = RunCounters::default();

        for (index, assignment) in assignments.iter().enumerate() {
            tracing::info!("[{}/{}] Downloading post: {}", index + 1, total, assignment.url);

            let outcome = materialize_post(
                &mut *self.renderer,
                self.fetcher,
                &self.ctx,
                identity,
                assignment,
            )
            .await;
            counters.record(outcome.is_saved());

            if (index + 1) % 10 == 0 || index + 1 == total {
                log_elapsed(
                    self.ctx.started,
                    &format!(
                        "Processed {}/{} posts ({} saved, {} failed)",
                        counters.processed(),
                        total,
                        counters.successful,
                        counters.failed
                    ),
                );
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        counters
    }

    fn summarize(
        &self,
        identity: &BlogIdentity,
        sections: &[Section],
        total_posts: usize,
        counters: RunCounters,
    ) -> Result<RunSummary, TeletypeError> {
        let summary = build_summary(
            &self.ctx.root,
            identity,
            sections.len(),
            total_posts,
            counters,
            self.ctx.started.elapsed(),
        );
        self.ctx.layout.write_json(SUMMARY_FILE, &summary)?;

        tracing::info!(
            "Backup completed: {} of {} posts saved, {} failed",
            summary.successful_downloads,
            summary.total_posts,
            summary.failed_downloads
        );
        tracing::info!("Backup saved to {}", self.ctx.layout.root().display());

        Ok(summary)
    }

    /// Moves to `to`, refusing anything but the next phase
    fn advance(&mut self, to: BackupPhase) -> Result<(), TeletypeError> {
        if !self.phase.can_transition_to(to) {
            return Err(TeletypeError::InvalidTransition {
                from: self.phase,
                to,
            });
        }

        tracing::debug!("Phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    async fn teardown(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        tracing::debug!("Phase {} -> {}", self.phase, BackupPhase::Teardown);
        self.phase = BackupPhase::Teardown;

        if let Err(e) = self.renderer.close().await {
            tracing::warn!("Failed to close renderer: {}", e);
        }
    }
}
