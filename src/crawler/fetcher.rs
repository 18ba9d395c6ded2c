//! Asset fetcher implementation
//!
//! This module handles the plain HTTP downloads of a backup (post images):
//! - Building the HTTP client with the configured user agent
//! - GET requests returning status and body bytes
//!
//! Pages themselves are never fetched here; they go through the renderer.

use crate::config::FetcherConfig;
use crate::TeletypeError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Result of one asset request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    /// HTTP status code
    pub status: u16,

    /// Response body; empty unless the status is a success
    pub bytes: Vec<u8>,
}

impl FetchedAsset {
    /// Returns true for 2xx responses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Downloads byte streams by URL
///
/// Implementations are stateless per call.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetches `url`
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedAsset)` - The server answered (any status)
    /// * `Err(TeletypeError)` - Transport failure (DNS, connect, timeout, body read)
    async fn get(&self, url: &str) -> Result<FetchedAsset, TeletypeError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`AssetFetcher`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpAssetFetcher {
    client: Client,
}

impl HttpAssetFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, TeletypeError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn get(&self, url: &str) -> Result<FetchedAsset, TeletypeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TeletypeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Ok(FetchedAsset {
                status,
                bytes: Vec::new(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TeletypeError::Http {
                url: url.to_string(),
                source,
            })?;

        Ok(FetchedAsset {
            status,
            bytes: bytes.to_vec(),
        })
    }
}
