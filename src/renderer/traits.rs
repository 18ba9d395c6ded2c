//! Renderer trait and error types

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while driving a renderer
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Script execution failed: {0}")]
    Script(String),

    #[error("Failed to read page content: {0}")]
    Content(String),

    #[error("Renderer is closed")]
    Closed,
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// A stateful, browser-like page session
///
/// One renderer is shared by the whole run and driven by one caller at a
/// time. Implementations apply their own settle delay after `navigate` and
/// `scroll_to_bottom`, so callers never sleep.
#[async_trait]
pub trait PageRenderer: Send {
    /// Loads `url` and returns the rendered markup once it has settled
    async fn navigate(&mut self, url: &str) -> RenderResult<String>;

    /// Scrolls the current document to the bottom to trigger lazy loading
    async fn scroll_to_bottom(&mut self) -> RenderResult<()>;

    /// Reads the live markup of the current document without reloading it
    async fn current_markup(&mut self) -> RenderResult<String>;

    /// Releases the underlying session
    ///
    /// Every other call fails with [`RenderError::Closed`] afterwards.
    async fn close(&mut self) -> RenderResult<()>;
}
