//! Block header lookup via public Esplora APIs
//!
//! Headers are resolved in two steps, `GET /block-height/{h}` for the hash and
//! `GET /block/{hash}` for the header JSON. Providers are tried in order and
//! the first success wins.

use async_trait::async_trait;

use crate::anchoring::error::AnchorError;
use crate::anchoring::types::BlockHeader;

/// Default Bitcoin Esplora providers, tried in order
pub const DEFAULT_BITCOIN_EXPLORERS: &[&str] =
    &["https://blockstream.info/api", "https://mempool.space/api"];

/// Source of block hashes and headers for one chain
#[async_trait]
pub trait BlockExplorer: Send + Sync {
    /// Hash of the block at `height`
    async fn block_hash(&self, height: u64) -> Result<String, AnchorError>;

    /// Header of the block with `hash`
    async fn block_header(&self, hash: &str) -> Result<BlockHeader, AnchorError>;

    /// Header of the block at `height`
    async fn header_at(&self, height: u64) -> Result<BlockHeader, AnchorError> {
        let hash = self.block_hash(height).await?;
        self.block_header(&hash).await
    }
}

/// Esplora client over a fixed provider list
#[cfg(feature = "http")]
pub struct EsploraExplorer {
    client: reqwest::Client,
    providers: Vec<String>,
    timeout_secs: u64,
}

#[cfg(feature = "http")]
impl EsploraExplorer {
    /// Create an explorer over `providers` (base URLs without trailing slash)
    ///
    /// # Errors
    ///
    /// Returns [`AnchorError::NotConfigured`] for an empty provider list and
    /// [`AnchorError::Network`] if the HTTP client cannot be built.
    pub fn new(providers: Vec<String>, timeout_secs: u64) -> Result<Self, AnchorError> {
        if providers.is_empty() {
            return Err(AnchorError::NotConfigured(
                "no block explorer URLs configured".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnchorError::Network(e.to_string()))?;

        Ok(Self {
            client,
            providers: providers
                .into_iter()
                .map(|p| p.trim_end_matches('/').to_string())
                .collect(),
            timeout_secs,
        })
    }

    /// Explorer over [`DEFAULT_BITCOIN_EXPLORERS`]
    ///
    /// # Errors
    ///
    /// See [`EsploraExplorer::new`].
    pub fn bitcoin(timeout_secs: u64) -> Result<Self, AnchorError> {
        Self::new(
            DEFAULT_BITCOIN_EXPLORERS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            timeout_secs,
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, AnchorError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AnchorError::from_reqwest(&e, self.timeout_secs))?;

        if !response.status().is_success() {
            return Err(AnchorError::ServiceError(format!(
                "Explorer returned status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AnchorError::Network(e.to_string()))
    }

    async fn fetch_hash(&self, base_url: &str, height: u64) -> Result<String, AnchorError> {
        let body = self
            .get_text(&format!("{base_url}/block-height/{height}"))
            .await?;
        let hash = body.trim();

        if hash.len() != 64 || hex::decode(hash).is_err() {
            return Err(AnchorError::InvalidResponse(format!(
                "not a block hash: {hash:?}"
            )));
        }
        Ok(hash.to_lowercase())
    }

    async fn fetch_header(&self, base_url: &str, hash: &str) -> Result<BlockHeader, AnchorError> {
        let body = self.get_text(&format!("{base_url}/block/{hash}")).await?;
        let block: crate::anchoring::types::EsploraBlock = serde_json::from_str(&body)
            .map_err(|e| AnchorError::InvalidResponse(format!("JSON error: {e}")))?;
        Ok(block.into())
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl BlockExplorer for EsploraExplorer {
    async fn block_hash(&self, height: u64) -> Result<String, AnchorError> {
        let mut errors = Vec::new();

        for provider in &self.providers {
            match self.fetch_hash(provider, height).await {
                Ok(hash) => return Ok(hash),
                Err(e) => {
                    tracing::warn!(
                        height = height,
                        provider = %provider,
                        error = %e,
                        "Failed to fetch block hash, trying next provider"
                    );
                    errors.push(format!("{}: {}", provider, e));
                }
            }
        }

        Err(AnchorError::BlockFetchFailed {
            height,
            details: errors.join("; "),
        })
    }

    async fn block_header(&self, hash: &str) -> Result<BlockHeader, AnchorError> {
        let mut errors = Vec::new();

        for provider in &self.providers {
            match self.fetch_header(provider, hash).await {
                Ok(header) => return Ok(header),
                Err(e) => {
                    tracing::warn!(
                        block_hash = %hash,
                        provider = %provider,
                        error = %e,
                        "Failed to fetch block header, trying next provider"
                    );
                    errors.push(format!("{}: {}", provider, e));
                }
            }
        }

        Err(AnchorError::ServiceError(format!(
            "failed to fetch block {hash}: {}",
            errors.join("; ")
        )))
    }
}
