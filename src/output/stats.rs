//! Run counters and summary generation

use crate::model::{BlogIdentity, RunSummary};
use crate::url::BlogRoot;
use std::time::{Duration, Instant};

/// Success and failure counts of the post downloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub successful: usize,
    pub failed: usize,
}

impl RunCounters {
    /// Records the outcome of one post
    pub fn record(&mut self, saved: bool) {
        if saved {
            self.successful += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn processed(&self) -> usize {
        self.successful + self.failed
    }
}

/// Formats a duration as `HH:MM:SS`
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use teletype_backup::output::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_secs(3725)), "01:02:05");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Logs a milestone annotated with the time elapsed since `started`
pub fn log_elapsed(started: Instant, message: &str) {
    tracing::info!(
        "{} - Time elapsed: {}",
        message,
        format_elapsed(started.elapsed())
    );
}

/// Builds the summary written at the end of a run
pub fn build_summary(
    root: &BlogRoot,
    identity: &BlogIdentity,
    sections: usize,
    total_posts: usize,
    counters: RunCounters,
    elapsed: Duration,
) -> RunSummary {
    RunSummary {
        blog_url: root.as_str().to_string(),
        domain: root.domain(),
        title: identity.title.clone(),
        username: identity.username.clone(),
        sections,
        total_posts,
        successful_downloads: counters.successful,
        failed_downloads: counters.failed,
        backup_date: chrono::Local::now().to_rfc3339(),
        elapsed_time: format_elapsed(elapsed),
    }
}
