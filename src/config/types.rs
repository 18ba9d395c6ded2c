use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Teletype-Backup
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub renderer: RendererConfig,
    pub fetcher: FetcherConfig,
    pub discovery: DiscoveryConfig,
    pub backup: BackupConfig,
}

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RendererConfig {
    /// Run the browser without a visible window
    pub headless: bool,

    pub window_width: u32,
    pub window_height: u32,

    /// Settle time after each navigation (milliseconds)
    pub page_load_delay_ms: u64,

    /// Settle time after each scroll-to-bottom (milliseconds)
    pub scroll_delay_ms: u64,

    /// Explicit Chrome/Chromium binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,

    /// Extra command-line arguments passed to the browser
    pub chrome_args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            page_load_delay_ms: 3000,
            scroll_delay_ms: 2000,
            chrome_executable: None,
            chrome_args: Vec::new(),
        }
    }
}

/// Image download client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// User-Agent header sent with every asset request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent:
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:98.0) Gecko/20100101 Firefox/98.0"
                    .to_string(),
            timeout_secs: 30,
        }
    }
}

/// Scroll-convergence limits for listing pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiscoveryConfig {
    /// Iteration cap for the whole-blog feed
    pub blog_max_scrolls: u32,

    /// Consecutive empty scrolls tolerated on the whole-blog feed
    pub blog_stagnation_limit: u32,

    /// Iteration cap for the home feed and each section
    pub section_max_scrolls: u32,

    /// Consecutive empty scrolls tolerated on a section
    pub section_stagnation_limit: u32,

    /// Scrolls that always happen on a section before stagnation can stop it
    pub section_grace_scrolls: u32,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            blog_max_scrolls: 50,
            blog_stagnation_limit: 5,
            section_max_scrolls: 30,
            section_stagnation_limit: 0,
            section_grace_scrolls: 3,
        }
    }
}

/// Run-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BackupConfig {
    /// Directory in which the timestamped run directory is created
    pub output_root: PathBuf,

    /// Pause between two post downloads (milliseconds)
    pub politeness_delay_ms: u64,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            politeness_delay_ms: 1000,
        }
    }
}
