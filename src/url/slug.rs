//! Filesystem-safe names derived from URLs

use sha2::{Digest, Sha256};
use std::borrow::Cow;
use std::collections::HashSet;
use url::Url;

/// Number of hex characters appended to a slug that collides with another
const SLUG_HASH_LEN: usize = 8;

/// Number of hex characters in a synthesized asset filename
const ASSET_HASH_LEN: usize = 16;

/// A post URL together with the directory name it will be written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugAssignment {
    pub url: String,
    pub slug: String,
}

/// Returns the first `len` hex characters of the SHA-256 digest of `input`
pub fn short_hash(input: &str, len: usize) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(len);
    hex
}

/// Derives a filesystem-safe slug from a post URL
///
/// The URL path is percent-decoded, stripped of surrounding slashes, and
/// every character that is not a letter, digit, `_` or `-` becomes `_`.
/// Non-ASCII letters are kept. A URL without a path yields `index`.
///
/// # Examples
///
/// ```
/// use teletype_backup::url::slug_for_url;
///
/// assert_eq!(slug_for_url("https://titanida.com/my-first-post"), "my-first-post");
/// assert_eq!(slug_for_url("https://teletype.in/@someone/notes.v2"), "_someone_notes_v2");
/// assert_eq!(slug_for_url("https://titanida.com/пост-1"), "пост-1");
/// ```
pub fn slug_for_url(url: &str) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => decode_path(parsed.path()).into_owned(),
        Err(_) => url.to_string(),
    };
    sanitize(path.trim_matches('/'))
}

/// Percent-decodes a URL path, keeping it as-is when it is not valid UTF-8
fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return "index".to_string();
    }

    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Assigns a unique slug to every URL of a worklist
///
/// The first URL that produces a given slug keeps it. Any later, distinct
/// URL that sanitizes to an already used slug gets a short hash of its own
/// URL appended (plus a counter if even that is taken), so two posts never
/// share a directory.
pub fn assign_slugs(urls: &[String]) -> Vec<SlugAssignment> {
    let mut taken = HashSet::new();
    let mut assignments = Vec::with_capacity(urls.len());

    for url in urls {
        let base = slug_for_url(url);
        let slug = if taken.contains(&base) {
            let hashed = format!("{}_{}", base, short_hash(url, SLUG_HASH_LEN));
            let mut disambiguated = hashed.clone();
            let mut attempt = 2;
            while taken.contains(&disambiguated) {
                disambiguated = format!("{}_{}", hashed, attempt);
                attempt += 1;
            }
            tracing::warn!(
                "Slug '{}' already used, writing {} to '{}'",
                base,
                url,
                disambiguated
            );
            disambiguated
        } else {
            base
        };

        taken.insert(slug.clone());
        assignments.push(SlugAssignment {
            url: url.clone(),
            slug,
        });
    }

    assignments
}

/// Derives the local filename of a downloaded image
///
/// Uses the last path segment of the image URL, percent-decoded. When the
/// path has no usable segment (e.g. `https://cdn/` or a trailing slash), a
/// name is synthesized from a SHA-256 hash of the full URL so repeated runs
/// agree.
pub fn asset_filename(url: &Url) -> String {
    let last_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(decode_path)
        .unwrap_or_default();

    if last_segment.is_empty() || last_segment == "." || last_segment == ".." {
        return format!("image_{}.jpg", short_hash(url.as_str(), ASSET_HASH_LEN));
    }

    last_segment
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | '%') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
