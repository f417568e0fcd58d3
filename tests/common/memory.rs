//! In-memory calendar and block explorer
//!
//! The calendar aggregates submitted digests the way a real calendar does:
//! each submission gets a per-calendar salt, and `confirm` commits every
//! outstanding commitment to one merkle tip attested at a block height.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use ots_client::anchoring::{AnchorError, BlockExplorer, BlockHeader, RemoteCalendar};
use ots_client::ots::MerkleTree;
use ots_client::{Attestation, Op, Timestamp};

#[derive(Default)]
pub struct MemoryCalendar {
    /// Commitments waiting for a block
    pending: Mutex<Vec<Vec<u8>>>,

    /// Upgraded timestamps by commitment
    confirmed: Mutex<HashMap<Vec<u8>, Timestamp>>,

    /// Calendar URLs that refuse submissions
    offline: Mutex<Vec<String>>,

    pub submit_count: AtomicUsize,
    pub upgrade_count: AtomicUsize,
}

impl MemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_offline(&self, url: &str) {
        self.offline.lock().push(url.to_string());
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Commit all pending digests to a Bitcoin block; returns the attested tip
    pub fn confirm(&self, height: u64) -> Option<Vec<u8>> {
        let commitments: Vec<Vec<u8>> = self.pending.lock().drain(..).collect();
        let mut tree = MerkleTree::new(&commitments)?;
        tree.tip_mut()
            .add_attestation(Attestation::Bitcoin { height });

        let mut confirmed = self.confirmed.lock();
        for (index, commitment) in commitments.iter().enumerate() {
            let mut upgraded = Timestamp::new(commitment.clone());
            tree.graft(index, &mut upgraded).ok()?;
            confirmed.insert(commitment.clone(), upgraded);
        }

        Some(tree.tip().digest().to_vec())
    }
}

#[async_trait]
impl RemoteCalendar for MemoryCalendar {
    async fn submit(&self, calendar_url: &str, digest: &[u8]) -> Result<Timestamp, AnchorError> {
        self.submit_count.fetch_add(1, Ordering::SeqCst);

        if self.offline.lock().iter().any(|u| u == calendar_url) {
            return Err(AnchorError::Network(format!("{calendar_url} is offline")));
        }

        let salt = Op::Sha256.apply(calendar_url.as_bytes())[..8].to_vec();
        let mut ts = Timestamp::new(digest.to_vec());
        let commitment = ts.add(Op::Append(salt)).add(Op::Sha256);
        commitment.add_attestation(Attestation::Pending {
            uri: calendar_url.to_string(),
        });

        self.pending.lock().push(commitment.digest().to_vec());
        Ok(ts)
    }

    async fn get_timestamp(
        &self,
        _calendar_url: &str,
        commitment: &[u8],
    ) -> Result<Option<Timestamp>, AnchorError> {
        self.upgrade_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.confirmed.lock().get(commitment).cloned())
    }
}

#[derive(Default)]
pub struct MemoryExplorer {
    headers: Mutex<HashMap<u64, BlockHeader>>,
    pub lookups: AtomicUsize,
}

impl MemoryExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block whose merkle root (display order) is `merkle_root_hex`
    pub fn insert(&self, height: u64, merkle_root_hex: &str, time: u64) {
        self.headers.lock().insert(
            height,
            BlockHeader {
                merkle_root: merkle_root_hex.to_string(),
                time,
                hash: format!("{:064x}", height),
                height,
            },
        );
    }

    /// Register a block committing to the attested `tip`
    pub fn insert_tip(&self, height: u64, tip: &[u8], time: u64) {
        let mut root = tip.to_vec();
        root.reverse();
        self.insert(height, &hex::encode(root), time);
    }
}

#[async_trait]
impl BlockExplorer for MemoryExplorer {
    async fn block_hash(&self, height: u64) -> Result<String, AnchorError> {
        self.headers
            .lock()
            .get(&height)
            .map(|h| h.hash.clone())
            .ok_or_else(|| AnchorError::BlockFetchFailed {
                height,
                details: "not in memory".into(),
            })
    }

    async fn block_header(&self, hash: &str) -> Result<BlockHeader, AnchorError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.headers
            .lock()
            .values()
            .find(|h| h.hash == hash)
            .cloned()
            .ok_or_else(|| AnchorError::ServiceError(format!("unknown block {hash}")))
    }
}
