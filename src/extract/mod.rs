//! Markup extraction for Teletype pages
//!
//! Pure functions that pull structured fields out of rendered markup. Every
//! field is described as an ordered list of [`Strategy`] values evaluated
//! lazily until one yields a value; a field that no strategy can produce is
//! simply absent, never an error.
//!
//! - [`extract_blog_identity`], [`extract_sections`] and
//!   [`extract_post_links`] read listing pages
//! - [`extract_post`] reads a single post page

mod blog;
mod post;
mod strategy;

pub use blog::{extract_blog_identity, extract_post_links, extract_sections, parse_post_count};
pub use post::{extract_post, ExtractedPost, TITLE_SEPARATOR};
pub use strategy::{first_match, Strategy};
