//! Image localization for post bodies
//!
//! Every `<img src>` in a post body is downloaded into the post's `assets/`
//! directory and the reference is rewritten to the local copy. Images that
//! cannot be fetched or stored keep their remote reference; they never fail
//! the post.

use crate::crawler::fetcher::AssetFetcher;
use crate::output::PostDir;
use crate::url::{asset_filename, is_absolute_http, short_hash};
use crate::TeletypeError;
use html_escape::decode_html_entities;
use lol_html::{element, HtmlRewriter, Settings};
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// Outcome of localizing one post body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedContent {
    /// Body markup with downloaded images pointing at `assets/…`
    pub content: String,

    /// Distinct image sources stored locally
    pub downloaded: usize,

    /// Distinct image sources left remote
    pub failed: usize,
}

/// Collects the distinct `img[src]` values of a fragment, in document order
pub fn image_sources(content: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(content);
    let Ok(selector) = Selector::parse("img[src]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    fragment
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.trim().is_empty())
        .filter(|src| seen.insert(src.to_string()))
        .map(str::to_string)
        .collect()
}

/// Resolves an image source against the post it appears in
pub fn resolve_image(src: &str, post_url: &Url) -> Option<Url> {
    let resolved = if is_absolute_http(src) {
        Url::parse(src)
    } else {
        post_url.join(src)
    };

    resolved
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Downloads the images of `content` and points them at the local copies
///
/// # Arguments
///
/// * `content` - Post body markup
/// * `post_url` - URL of the post, base for relative sources
/// * `post_dir` - Directory receiving `assets/`
/// * `fetcher` - Image downloader
///
/// # Returns
///
/// * `Ok(LocalizedContent)` - Rewritten markup and per-image counts
/// * `Err(TeletypeError)` - The markup could not be rewritten
pub async fn localize_images<F: AssetFetcher + ?Sized>(
    content: &str,
    post_url: &Url,
    post_dir: &PostDir,
    fetcher: &F,
) -> Result<LocalizedContent, TeletypeError> {
    let mut replacements: HashMap<String, String> = HashMap::new();
    let mut used_names: HashMap<String, String> = HashMap::new();
    let mut failed = 0;

    for src in image_sources(content) {
        let Some(image_url) = resolve_image(&src, post_url) else {
            tracing::warn!("Skipping image with unusable source: {}", src);
            failed += 1;
            continue;
        };

        // two different images with the same basename must not overwrite each other
        let mut filename = asset_filename(&image_url);
        match used_names.get(&filename) {
            Some(owner) if owner != image_url.as_str() => {
                filename = format!("{}_{}", short_hash(image_url.as_str(), 8), filename);
            }
            _ => {}
        }

        match fetcher.get(image_url.as_str()).await {
            Ok(asset) if asset.is_success() => match post_dir.write_asset(&filename, &asset.bytes) {
                Ok(local) => {
                    tracing::debug!("Saved image {} as {}", image_url, local);
                    used_names.insert(filename, image_url.to_string());
                    replacements.insert(src, local);
                }
                Err(e) => {
                    tracing::error!("Error saving image {} as {}: {}", image_url, filename, e);
                    failed += 1;
                }
            },
            Ok(asset) => {
                tracing::warn!(
                    "Failed to download image {}: HTTP {}",
                    image_url,
                    asset.status
                );
                failed += 1;
            }
            Err(e) => {
                tracing::error!("Error downloading image {}: {}", image_url, e);
                failed += 1;
            }
        }
    }

    let downloaded = replacements.len();
    let content = if replacements.is_empty() {
        content.to_string()
    } else {
        rewrite_image_sources(content, &replacements)?
    };

    Ok(LocalizedContent {
        content,
        downloaded,
        failed,
    })
}

/// Replaces `img` sources found in `replacements`, leaving all other markup
/// untouched
///
/// `replacements` is keyed by decoded attribute values; the raw value seen
/// by the rewriter may still carry entities such as `&amp;`.
fn rewrite_image_sources(
    html: &str,
    replacements: &HashMap<String, String>,
) -> Result<String, TeletypeError> {
    let mut output = Vec::with_capacity(html.len());
    let rewrites = AtomicUsize::new(0);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("img[src]", |el| {
                if let Some(src) = el.get_attribute("src") {
                    let decoded = decode_html_entities(&src);
                    if let Some(local) = replacements
                        .get(decoded.as_ref())
                        .or_else(|| replacements.get(&src))
                    {
                        el.set_attribute("src", local)?;
                        rewrites.fetch_add(1, Ordering::Relaxed);
                    }
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| TeletypeError::Rewrite(e.to_string()))?;
    rewriter
        .end()
        .map_err(|e| TeletypeError::Rewrite(e.to_string()))?;

    tracing::debug!("Rewrote {} image references", rewrites.load(Ordering::Relaxed));

    String::from_utf8(output).map_err(|e| TeletypeError::Rewrite(e.to_string()))
}
