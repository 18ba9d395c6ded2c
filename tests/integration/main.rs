//! Integration tests for complete backup runs
//!
//! Pages are served by a scripted renderer; images are served over HTTP by
//! wiremock and downloaded with the real fetcher.

mod backup_tests;
mod support;
