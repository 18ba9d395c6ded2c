//! Output module for writing a backup to disk
//!
//! This module handles:
//! - The run directory layout and every file written into it
//! - The human-readable Markdown form of a post
//! - Run counters, elapsed-time formatting and the final summary

mod layout;
mod markdown;
pub mod stats;

pub use layout::{
    PostDir, RunLayout, BLOG_INFO_FILE, HOMEPAGE_FILE, LOG_FILE, POST_URLS_FILE, SECTIONS_FILE,
    SUMMARY_FILE,
};
pub use markdown::render_document;
pub use stats::{build_summary, format_elapsed, log_elapsed, RunCounters};
