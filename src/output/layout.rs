//! Run directory layout
//!
//! ```text
//! teletype_backup_<domain>_<YYYYmmdd_HHMMSS>/
//! ├── backup.log
//! ├── homepage.html
//! ├── blog_info.json
//! ├── sections.json
//! ├── post_urls.json
//! ├── backup_summary.json
//! └── posts/<slug>/{original.html, index.md, post.json, assets/<file>}
//! ```

use crate::model::PostRecord;
use crate::url::dir_safe_domain;
use crate::TeletypeError;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "backup.log";
pub const HOMEPAGE_FILE: &str = "homepage.html";
pub const BLOG_INFO_FILE: &str = "blog_info.json";
pub const SECTIONS_FILE: &str = "sections.json";
pub const POST_URLS_FILE: &str = "post_urls.json";
pub const SUMMARY_FILE: &str = "backup_summary.json";

const POSTS_DIR: &str = "posts";
const ORIGINAL_FILE: &str = "original.html";
const DOCUMENT_FILE: &str = "index.md";
const RECORD_FILE: &str = "post.json";
const ASSETS_DIR: &str = "assets";

/// The directory tree of one backup run
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
}

impl RunLayout {
    /// Creates a fresh, timestamped run directory under `output_root`
    ///
    /// # Arguments
    ///
    /// * `output_root` - Parent directory of all runs
    /// * `domain` - Blog domain, embedded in the directory name
    /// * `started_at` - Start of the run, embedded in the directory name
    pub fn create(
        output_root: &Path,
        domain: &str,
        started_at: DateTime<Local>,
    ) -> Result<Self, TeletypeError> {
        let name = format!(
            "teletype_backup_{}_{}",
            dir_safe_domain(domain),
            started_at.format("%Y%m%d_%H%M%S")
        );
        Self::at(output_root.join(name))
    }

    /// Uses `root` as the run directory, creating it if needed
    pub fn at(root: PathBuf) -> Result<Self, TeletypeError> {
        fs::create_dir_all(root.join(POSTS_DIR))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// Writes a top-level text file
    pub fn write_text(&self, name: &str, content: &str) -> Result<(), TeletypeError> {
        fs::write(self.root.join(name), content)?;
        Ok(())
    }

    /// Writes a top-level JSON file, pretty-printed
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        name: &str,
        value: &T,
    ) -> Result<(), TeletypeError> {
        write_json_file(&self.root.join(name), value)
    }

    /// The directory of one post; nothing is created until it is written
    pub fn post_dir(&self, slug: &str) -> PostDir {
        PostDir {
            dir: self.root.join(POSTS_DIR).join(slug),
        }
    }
}

/// Files of a single post
#[derive(Debug, Clone)]
pub struct PostDir {
    dir: PathBuf,
}

impl PostDir {
    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn create(&self) -> Result<(), TeletypeError> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn write_original(&self, html: &str) -> Result<(), TeletypeError> {
        fs::write(self.dir.join(ORIGINAL_FILE), html)?;
        Ok(())
    }

    pub fn write_document(&self, document: &str) -> Result<(), TeletypeError> {
        fs::write(self.dir.join(DOCUMENT_FILE), document)?;
        Ok(())
    }

    pub fn write_record(&self, record: &PostRecord) -> Result<(), TeletypeError> {
        write_json_file(&self.dir.join(RECORD_FILE), record)
    }

    /// Stores an image and returns the path to reference it by from the
    /// post's own files
    pub fn write_asset(&self, filename: &str, bytes: &[u8]) -> Result<String, TeletypeError> {
        let assets = self.dir.join(ASSETS_DIR);
        fs::create_dir_all(&assets)?;
        fs::write(assets.join(filename), bytes)?;
        Ok(format!("{}/{}", ASSETS_DIR, filename))
    }
}

fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TeletypeError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_create_names_directory_after_domain_and_time() {
        let tmp = TempDir::new().unwrap();
        let started = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();

        let layout = RunLayout::create(tmp.path(), "titanida.com", started).unwrap();

        assert_eq!(
            layout.root(),
            tmp.path().join("teletype_backup_titanida.com_20240305_140709")
        );
        assert!(layout.root().join("posts").is_dir());
    }

    #[test]
    fn test_write_json_is_pretty() {
        let tmp = TempDir::new().unwrap();
        let layout = RunLayout::at(tmp.path().join("run")).unwrap();

        layout
            .write_json(POST_URLS_FILE, &vec!["https://a.test/1".to_string()])
            .unwrap();

        let written = fs::read_to_string(layout.root().join(POST_URLS_FILE)).unwrap();
        assert_eq!(written, "[\n  \"https://a.test/1\"\n]");
    }

    #[test]
    fn test_post_dir_files() {
        let tmp = TempDir::new().unwrap();
        let layout = RunLayout::at(tmp.path().to_path_buf()).unwrap();
        let post = layout.post_dir("my-post");

        post.create().unwrap();
        post.write_original("<html></html>").unwrap();
        let reference = post.write_asset("photo.jpg", b"jpeg").unwrap();

        assert_eq!(reference, "assets/photo.jpg");
        assert_eq!(
            fs::read(tmp.path().join("posts/my-post/assets/photo.jpg")).unwrap(),
            b"jpeg"
        );
        assert!(tmp.path().join("posts/my-post/original.html").is_file());
    }
}
