//! Teletype-Backup: a full-fidelity exporter for Teletype blogs
//!
//! This crate discovers every published post of a blog (including posts only
//! reachable through its sections), renders each post in a headless browser,
//! extracts structured metadata and body content, downloads embedded images,
//! and writes everything to a self-contained local directory tree.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod renderer;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Teletype-Backup operations
#[derive(Debug, Error)]
pub enum TeletypeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Renderer error: {0}")]
    Render(#[from] renderer::RenderError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("HTML rewrite error: {0}")]
    Rewrite(String),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::BackupPhase,
        to: state::BackupPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Teletype-Backup operations
pub type Result<T> = std::result::Result<T, TeletypeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{BlogIdentity, PostRecord, RunSummary, Section};
pub use state::BackupPhase;
pub use url::BlogRoot;
