//! Configuration module for Teletype-Backup
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every table has defaults, so a backup can run without
//! any file at all.
//!
//! # Example
//!
//! ```no_run
//! use teletype_backup::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("teletype.toml")).unwrap();
//! println!("Politeness delay: {}ms", config.backup.politeness_delay_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BackupConfig, Config, DiscoveryConfig, FetcherConfig, RendererConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
