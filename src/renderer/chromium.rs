//! Headless Chromium renderer over the DevTools protocol

use crate::config::RendererConfig;
use crate::renderer::traits::{PageRenderer, RenderError, RenderResult};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Common Chrome executable paths to check
const CHROME_PATHS: &[&str] = &[
    // Linux
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    "/snap/bin/chromium",
    // macOS
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/opt/google/chrome/google-chrome",
];

/// A single Chromium tab reused for the whole run
pub struct ChromiumRenderer {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    page_load_delay: Duration,
    scroll_delay: Duration,
}

impl ChromiumRenderer {
    /// Launches the browser and opens the tab every later call will use
    ///
    /// # Returns
    ///
    /// * `Ok(ChromiumRenderer)` - Browser is running with one blank tab
    /// * `Err(RenderError::Launch)` - No browser found, or it failed to start
    pub async fn launch(config: &RendererConfig) -> RenderResult<Self> {
        let chrome_path = match &config.chrome_executable {
            Some(path) => path.clone(),
            None => find_chrome()?,
        };

        info!(
            "Launching browser {} (headless={})",
            chrome_path.display(),
            config.headless
        );

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .window_size(config.window_width, config.window_height);

        // with_head means NOT headless
        if !config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--no-sandbox")
            .arg("--disable-gpu");

        for arg in &config.chrome_args {
            builder = builder.arg(arg.as_str());
        }

        let browser_config = builder.build().map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Launch(format!("failed to open tab: {}", e)))?;

        Ok(Self {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler),
            page_load_delay: Duration::from_millis(config.page_load_delay_ms),
            scroll_delay: Duration::from_millis(config.scroll_delay_ms),
        })
    }

    fn page(&self) -> RenderResult<&Page> {
        self.page.as_ref().ok_or(RenderError::Closed)
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn navigate(&mut self, url: &str) -> RenderResult<String> {
        debug!("Navigating to {}", url);
        self.page()?
            .goto(url)
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        tokio::time::sleep(self.page_load_delay).await;
        self.current_markup().await
    }

    async fn scroll_to_bottom(&mut self) -> RenderResult<()> {
        self.page()?
            .evaluate(SCROLL_SCRIPT.to_string())
            .await
            .map_err(|e| RenderError::Script(e.to_string()))?;

        tokio::time::sleep(self.scroll_delay).await;
        Ok(())
    }

    async fn current_markup(&mut self) -> RenderResult<String> {
        self.page()?
            .content()
            .await
            .map_err(|e| RenderError::Content(e.to_string()))
    }

    async fn close(&mut self) -> RenderResult<()> {
        self.page = None;

        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        if let Err(e) = browser.close().await {
            warn!("Browser did not close cleanly: {}", e);
        }
        if let Err(e) = browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        info!("Browser closed");
        Ok(())
    }
}

/// Finds a Chrome or Chromium executable
fn find_chrome() -> RenderResult<PathBuf> {
    for path in CHROME_PATHS {
        let p = Path::new(path);
        if p.exists() {
            debug!("Found Chrome at: {}", path);
            return Ok(p.to_path_buf());
        }
    }

    for cmd in &[
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
    ] {
        if let Ok(output) = std::process::Command::new("which").arg(cmd).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    debug!("Found Chrome in PATH: {}", path);
                    return Ok(PathBuf::from(path));
                }
            }
        }
    }

    Err(RenderError::Launch(
        "Chrome/Chromium not found; install it or set renderer.chrome-executable".to_string(),
    ))
}
