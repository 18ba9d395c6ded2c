use url::Url;

/// Returns the host of a URL followed by its explicit port, if any
///
/// # Examples
///
/// ```
/// use url::Url;
/// use teletype_backup::url::netloc;
///
/// let url = Url::parse("https://Titanida.com/path").unwrap();
/// assert_eq!(netloc(&url), "titanida.com");
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(netloc(&url), "localhost:8080");
/// ```
pub fn netloc(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_lowercase();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    }
}

/// Turns a domain into a token usable inside a directory name
///
/// Letters, digits, `.` and `-` are kept; anything else (such as the `:`
/// before a port) becomes `_`.
pub fn dir_safe_domain(domain: &str) -> String {
    domain
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
