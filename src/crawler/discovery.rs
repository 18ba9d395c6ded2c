//! Infinite-scroll link discovery
//!
//! A listing page (home feed or section) only reveals more posts as it is
//! scrolled. Discovery repeatedly extracts post links from the live markup,
//! scrolls, and stops on the first of:
//! - Stagnation: too many consecutive scrolls revealed nothing new
//! - Target: as many links as the blog claims to have posts
//! - The iteration cap

use crate::config::DiscoveryConfig;
use crate::extract::extract_post_links;
use crate::renderer::PageRenderer;
use crate::url::BlogRoot;
use crate::TeletypeError;
use std::collections::HashSet;
use std::fmt;

/// Stopping rules for one listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    /// Hard cap on extract/scroll iterations
    pub max_iterations: u32,

    /// Consecutive iterations without new links that are tolerated
    pub stagnation_limit: u32,

    /// Stagnation never stops discovery at or before this iteration
    pub grace_iterations: u32,

    /// Stop once this many distinct links have been collected
    pub target: Option<usize>,
}

impl ScrollPolicy {
    /// Policy for the whole-blog feed, targeting the advertised post count
    pub fn blog(config: &DiscoveryConfig, post_count: Option<u32>) -> Self {
        Self {
            max_iterations: config.blog_max_scrolls,
            stagnation_limit: config.blog_stagnation_limit,
            grace_iterations: 0,
            target: post_count.map(|count| count as usize),
        }
    }

    /// Policy for the home feed and every section
    pub fn section(config: &DiscoveryConfig) -> Self {
        Self {
            max_iterations: config.section_max_scrolls,
            stagnation_limit: config.section_stagnation_limit,
            grace_iterations: config.section_grace_scrolls,
            target: None,
        }
    }
}

impl fmt::Display for ScrollPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "up to {} scrolls, stagnation limit {}",
            self.max_iterations, self.stagnation_limit
        )?;
        if self.grace_iterations > 0 {
            write!(f, ", {} grace scrolls", self.grace_iterations)?;
        }
        if let Some(target) = self.target {
            write!(f, ", target {} posts", target)?;
        }
        Ok(())
    }
}

/// Why a discovery loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Stagnated,
    TargetReached,
    IterationCap,
}

/// Links found on one listing page, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub links: Vec<String>,

    /// Number of extract passes performed
    pub iterations: u32,

    pub stop: StopReason,
}

/// Insertion-ordered set of absolute URLs
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link, returning true if it was not already present
    pub fn insert(&mut self, link: String) -> bool {
        if self.seen.contains(&link) {
            return false;
        }
        self.seen.insert(link.clone());
        self.ordered.push(link);
        true
    }

    /// Adds every link, returning how many were new
    pub fn extend<I: IntoIterator<Item = String>>(&mut self, links: I) -> usize {
        links
            .into_iter()
            .filter(|link| self.insert(link.clone()))
            .count()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}

/// Collects post links from a scrolling listing page
///
/// Navigates to `listing_url`, then alternates link extraction and scrolling
/// until `policy` says to stop. Renderer failures abort the discovery.
///
/// # Arguments
///
/// * `renderer` - The shared page session
/// * `root` - The blog whose posts are being collected
/// * `listing_url` - Home feed or section URL
/// * `policy` - When to stop scrolling
pub async fn discover_posts<R: PageRenderer + ?Sized>(
    renderer: &mut R,
    root: &BlogRoot,
    listing_url: &str,
    policy: &ScrollPolicy,
) -> Result<Discovery, TeletypeError> {
    let mut markup = renderer.navigate(listing_url).await?;
    let mut links = LinkSet::new();
    let mut stagnant = 0u32;
    let mut iterations = 0u32;
    let mut stop = StopReason::IterationCap;

    for iteration in 0..policy.max_iterations {
        iterations = iteration + 1;

        let added = links.extend(extract_post_links(&markup, root));
        if added == 0 {
            stagnant += 1;
        } else {
            stagnant = 0;
        }

        tracing::debug!(
            "Scroll {}/{} on {}: {} new, {} total",
            iteration + 1,
            policy.max_iterations,
            listing_url,
            added,
            links.len()
        );

        if stagnant > policy.stagnation_limit && iteration > policy.grace_iterations {
            stop = StopReason::Stagnated;
            break;
        }

        if let Some(target) = policy.target {
            if links.len() >= target {
                stop = StopReason::TargetReached;
                break;
            }
        }

        renderer.scroll_to_bottom().await?;
        markup = renderer.current_markup().await?;
    }

    if stop == StopReason::IterationCap {
        tracing::warn!(
            "Stopped scrolling {} after {} iterations; more posts may exist",
            listing_url,
            iterations
        );
    }

    tracing::debug!(
        "Discovery on {} stopped after {} iterations ({:?})",
        listing_url,
        iterations,
        stop
    );

    Ok(Discovery {
        links: links.into_vec(),
        iterations,
        stop,
    })
}
