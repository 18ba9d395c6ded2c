//! URL handling module for Teletype-Backup
//!
//! This module provides the blog root type, link resolution against that
//! root, and the filesystem-safe names derived from URLs (post slugs and
//! asset filenames).

mod domain;
mod normalize;
mod slug;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{dir_safe_domain, netloc};
pub use normalize::{is_absolute_http, resolve_link};
pub use slug::{asset_filename, assign_slugs, short_hash, slug_for_url, SlugAssignment};

/// The base address of a blog, without its trailing slash
///
/// Every post and section link is resolved against this root, so two
/// spellings of the same post (`/p` and `https://host/p`) compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogRoot {
    /// Root as the user gave it, trailing slash removed
    root: String,

    /// Root with a trailing slash, used as the join base
    base: Url,
}

impl BlogRoot {
    /// Parses a blog address
    ///
    /// Only `http` and `https` addresses with a host are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use teletype_backup::url::BlogRoot;
    ///
    /// let root = BlogRoot::parse("https://titanida.com/").unwrap();
    /// assert_eq!(root.as_str(), "https://titanida.com");
    /// assert_eq!(root.resolve("/my-post").as_deref(), Some("https://titanida.com/my-post"));
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let root = input.trim().trim_end_matches('/').to_string();
        let base = Url::parse(&format!("{}/", root)).map_err(|e| UrlError::Parse(e.to_string()))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                base.scheme()
            )));
        }

        if base.host_str().is_none() {
            return Err(UrlError::MissingDomain);
        }

        Ok(Self { root, base })
    }

    /// The root address without a trailing slash
    pub fn as_str(&self) -> &str {
        &self.root
    }

    /// The join base (root with a trailing slash)
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Host and optional port of the blog
    pub fn domain(&self) -> String {
        netloc(&self.base)
    }

    /// Resolves a link found on one of the blog's pages to an absolute URL
    pub fn resolve(&self, href: &str) -> Option<String> {
        resolve_link(href, &self.base)
    }

    /// Returns true if `url` points at the blog root itself
    pub fn is_root(&self, url: &str) -> bool {
        url.trim_end_matches('/') == self.root
    }
}

impl std::fmt::Display for BlogRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_trailing_slash() {
        let root = BlogRoot::parse("https://titanida.com///").unwrap();
        assert_eq!(root.as_str(), "https://titanida.com");
        assert_eq!(root.base().as_str(), "https://titanida.com/");
    }

    #[test]
    fn test_parse_rejects_other_schemes() {
        assert!(matches!(
            BlogRoot::parse("ftp://titanida.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BlogRoot::parse("not a url").is_err());
        assert!(BlogRoot::parse("").is_err());
    }

    #[test]
    fn test_resolve_path_only_link_uses_scheme_and_host() {
        let root = BlogRoot::parse("https://teletype.in/@someone").unwrap();
        assert_eq!(
            root.resolve("/@someone/post-1").as_deref(),
            Some("https://teletype.in/@someone/post-1")
        );
    }

    #[test]
    fn test_resolve_bare_relative_link_uses_root() {
        let root = BlogRoot::parse("https://teletype.in/@someone").unwrap();
        assert_eq!(
            root.resolve("travel").as_deref(),
            Some("https://teletype.in/@someone/travel")
        );
    }

    #[test]
    fn test_resolve_absolute_link_unchanged() {
        let root = BlogRoot::parse("https://titanida.com").unwrap();
        assert_eq!(
            root.resolve("https://titanida.com/post").as_deref(),
            Some("https://titanida.com/post")
        );
    }

    #[test]
    fn test_is_root() {
        let root = BlogRoot::parse("https://titanida.com").unwrap();
        assert!(root.is_root("https://titanida.com"));
        assert!(root.is_root("https://titanida.com/"));
        assert!(!root.is_root("https://titanida.com/travel"));
    }

    #[test]
    fn test_domain_keeps_port() {
        let root = BlogRoot::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(root.domain(), "127.0.0.1:8080");
    }
}
