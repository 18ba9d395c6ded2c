//! Renderer gateway
//!
//! Teletype renders its feeds client-side, so every page the backup reads
//! goes through a [`PageRenderer`]: a browser-like session that navigates,
//! scrolls, and hands back the live document markup.
//!
//! - [`ChromiumRenderer`] drives a headless Chromium over the DevTools protocol
//! - [`ScriptedRenderer`] replays recorded markup without a browser
//!
//! `ScriptedRenderer` is a public fake session: integration tests and
//! library users can drive the whole pipeline with it, without Chromium.

mod chromium;
mod scripted;
mod traits;

pub use chromium::ChromiumRenderer;
pub use scripted::ScriptedRenderer;
pub use traits::{PageRenderer, RenderError, RenderResult};
