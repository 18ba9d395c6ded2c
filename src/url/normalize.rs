use url::Url;

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// The fragment of the resolved URL is dropped so that `/post#comments`
/// and `/post` are the same post.
///
/// # Examples
///
/// ```
/// use teletype_backup::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://titanida.com/").unwrap();
/// assert_eq!(
///     resolve_link("/post#top", &base).as_deref(),
///     Some("https://titanida.com/post")
/// );
/// assert_eq!(resolve_link("mailto:me@titanida.com", &base), None);
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                absolute_url.set_fragment(None);
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Returns true if `src` already carries an http(s) scheme
pub fn is_absolute_http(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}
