//! Explicit run context threaded through every backup step

use crate::config::Config;
use crate::output::RunLayout;
use crate::url::BlogRoot;
use std::time::Instant;

/// Everything a run step needs to know about the run it belongs to
///
/// Collaborators with state (renderer, fetcher) and the blog identity are
/// passed next to it, never stored in it.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The blog being backed up
    pub root: BlogRoot,

    /// Where the run writes its files
    pub layout: RunLayout,

    pub config: Config,

    /// Start of the run, for elapsed-time annotations
    pub started: Instant,
}

impl RunContext {
    pub fn new(root: BlogRoot, layout: RunLayout, config: Config) -> Self {
        Self {
            root,
            layout,
            config,
            started: Instant::now(),
        }
    }
}
