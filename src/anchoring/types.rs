//! Anchoring result types

use serde::{Deserialize, Serialize};

/// Blockchains whose block headers can confirm an attestation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Chain {
    Bitcoin,
    Litecoin,
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Bitcoin => f.write_str("bitcoin"),
            Chain::Litecoin => f.write_str("litecoin"),
        }
    }
}

/// Block header fields needed to check an attestation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Merkle root as hex, in display (big-endian) byte order
    pub merkle_root: String,

    /// Block time (unix seconds)
    pub time: u64,

    /// Block hash as hex
    pub hash: String,

    pub height: u64,
}

/// Esplora `GET /block/{hash}` response body
#[derive(Debug, Deserialize)]
pub(crate) struct EsploraBlock {
    pub id: String,
    pub height: u64,
    pub timestamp: u64,
    pub merkle_root: String,
}

impl From<EsploraBlock> for BlockHeader {
    fn from(block: EsploraBlock) -> Self {
        Self {
            merkle_root: block.merkle_root,
            time: block.timestamp,
            hash: block.id,
            height: block.height,
        }
    }
}

/// Outcome of verifying one chain's attestations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    /// Block time of the attesting block
    pub timestamp: Option<u64>,

    /// Lowest attesting block height
    pub height: u64,
}

impl VerifyResult {
    #[must_use]
    pub fn new(timestamp: Option<u64>, height: u64) -> Self {
        Self { timestamp, height }
    }

    /// Block time as a UTC date
    #[must_use]
    pub fn date(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.timestamp
            .and_then(|t| i64::try_from(t).ok())
            .and_then(|t| chrono::DateTime::from_timestamp(t, 0))
    }
}
