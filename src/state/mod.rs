//! State module for tracking backup progress
//!
//! # Components
//!
//! - `BackupPhase`: the linear phase machine driven by the orchestrator

mod backup_phase;

// Re-export main types
pub use backup_phase::BackupPhase;
