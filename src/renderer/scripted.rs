//! In-memory renderer that replays recorded markup

use crate::renderer::traits::{PageRenderer, RenderError, RenderResult};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// A renderer serving pre-recorded markup instead of a live browser
///
/// Each URL maps to a list of frames: navigation shows the first frame and
/// every scroll advances to the next one, staying on the last frame once
/// the list is exhausted. This mirrors an infinite feed that eventually
/// stops growing.
#[derive(Debug, Default)]
pub struct ScriptedRenderer {
    pages: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    current: Option<(String, usize)>,
    navigations: Vec<String>,
    scrolls: usize,
    closes: usize,
}

impl ScriptedRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves a page whose markup never changes
    pub fn with_page(self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.with_frames(url, vec![markup.into()])
    }

    /// Serves a page whose markup grows with each scroll
    pub fn with_frames(mut self, url: impl Into<String>, frames: Vec<String>) -> Self {
        let url: String = url.into();
        self.pages.insert(url.trim_end_matches('/').to_string(), frames);
        self
    }

    /// Makes navigation to `url` fail
    pub fn with_failure(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.failing.insert(url.trim_end_matches('/').to_string());
        self
    }

    /// URLs navigated to so far, in order
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Number of scroll requests received
    pub fn scrolls(&self) -> usize {
        self.scrolls
    }

    /// Number of times `close` was called
    pub fn closes(&self) -> usize {
        self.closes
    }

    fn ensure_open(&self) -> RenderResult<()> {
        if self.closes > 0 {
            return Err(RenderError::Closed);
        }
        Ok(())
    }

    fn frame(&self) -> RenderResult<String> {
        let (url, index) = self
            .current
            .as_ref()
            .ok_or_else(|| RenderError::Content("no page loaded".to_string()))?;

        let frames = &self.pages[url];
        Ok(frames
            .get(*index)
            .or_else(|| frames.last())
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl PageRenderer for ScriptedRenderer {
    async fn navigate(&mut self, url: &str) -> RenderResult<String> {
        self.ensure_open()?;
        self.navigations.push(url.to_string());

        let key = url.trim_end_matches('/').to_string();
        if self.failing.contains(&key) || !self.pages.contains_key(&key) {
            self.current = None;
            return Err(RenderError::Navigation {
                url: url.to_string(),
                message: "no recorded page".to_string(),
            });
        }

        self.current = Some((key, 0));
        self.frame()
    }

    async fn scroll_to_bottom(&mut self) -> RenderResult<()> {
        self.ensure_open()?;
        self.scrolls += 1;
        if let Some((_, index)) = self.current.as_mut() {
            *index += 1;
        }
        Ok(())
    }

    async fn current_markup(&mut self) -> RenderResult<String> {
        self.ensure_open()?;
        self.frame()
    }

    async fn close(&mut self) -> RenderResult<()> {
        self.closes += 1;
        Ok(())
    }
}
