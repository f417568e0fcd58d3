//! In-memory calendar and explorer for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::anchoring::bitcoin::BlockExplorer;
use crate::anchoring::calendar::RemoteCalendar;
use crate::anchoring::error::AnchorError;
use crate::anchoring::types::BlockHeader;
use crate::ots::{Attestation, Op, Timestamp};

/// Mock calendar
///
/// `submit` answers with `prepend(calendar_url) -> sha256 -> Pending(calendar_url)`.
/// Once [`MockCalendar::confirm`] is called, `get_timestamp` answers every
/// known commitment with `sha256 -> Bitcoin(height)`.
pub struct MockCalendar {
    /// URLs whose submissions fail
    pub failing_urls: Mutex<Vec<String>>,

    /// Height to attest on upgrade, once confirmed
    confirmed_height: Mutex<Option<u64>>,

    /// Whether upgrade requests fail outright
    pub upgrade_should_fail: AtomicBool,

    pub submit_call_count: AtomicUsize,
    pub upgrade_call_count: AtomicUsize,
}

impl Default for MockCalendar {
    fn default() -> Self {
        Self {
            failing_urls: Mutex::new(Vec::new()),
            confirmed_height: Mutex::new(None),
            upgrade_should_fail: AtomicBool::new(false),
            submit_call_count: AtomicUsize::new(0),
            upgrade_call_count: AtomicUsize::new(0),
        }
    }
}

impl MockCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock where submissions to `urls` fail
    pub fn failing_for(urls: &[&str]) -> Self {
        let mock = Self::default();
        *mock.failing_urls.lock() = urls.iter().map(|u| (*u).to_string()).collect();
        mock
    }

    /// Start answering upgrades with a Bitcoin attestation at `height`
    pub fn confirm(&self, height: u64) {
        *self.confirmed_height.lock() = Some(height);
    }

    /// Commitment digest the mock returns for a submission to `calendar_url`
    pub fn commitment_for(digest: &[u8], calendar_url: &str) -> Vec<u8> {
        Op::Sha256.apply(&Op::Prepend(calendar_url.as_bytes().to_vec()).apply(digest))
    }

    /// Message the upgrade attests for `commitment`
    pub fn attested_message(commitment: &[u8]) -> Vec<u8> {
        Op::Sha256.apply(commitment)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_call_count.load(Ordering::SeqCst)
    }

    pub fn upgrade_calls(&self) -> usize {
        self.upgrade_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCalendar for MockCalendar {
    async fn submit(&self, calendar_url: &str, digest: &[u8]) -> Result<Timestamp, AnchorError> {
        self.submit_call_count.fetch_add(1, Ordering::SeqCst);

        if self.failing_urls.lock().iter().any(|u| u == calendar_url) {
            return Err(AnchorError::Network("mock submit failure".into()));
        }

        let mut ts = Timestamp::new(digest.to_vec());
        ts.add(Op::Prepend(calendar_url.as_bytes().to_vec()))
            .add(Op::Sha256)
            .add_attestation(Attestation::Pending {
                uri: calendar_url.to_string(),
            });
        Ok(ts)
    }

    async fn get_timestamp(
        &self,
        _calendar_url: &str,
        commitment: &[u8],
    ) -> Result<Option<Timestamp>, AnchorError> {
        self.upgrade_call_count.fetch_add(1, Ordering::SeqCst);

        if self.upgrade_should_fail.load(Ordering::SeqCst) {
            return Err(AnchorError::ServiceError("mock upgrade failure".into()));
        }

        let Some(height) = *self.confirmed_height.lock() else {
            return Ok(None);
        };

        let mut ts = Timestamp::new(commitment.to_vec());
        ts.add(Op::Sha256)
            .add_attestation(Attestation::Bitcoin { height });
        Ok(Some(ts))
    }
}

/// Mock explorer serving fixed headers by height
#[derive(Default)]
pub struct MockExplorer {
    blocks: Mutex<HashMap<u64, BlockHeader>>,
    pub header_call_count: AtomicUsize,
}

impl MockExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block whose merkle root commits to `attested_msg`
    pub fn add_block(&self, height: u64, attested_msg: &[u8], time: u64) {
        let mut root = attested_msg.to_vec();
        root.reverse();
        self.blocks.lock().insert(
            height,
            BlockHeader {
                merkle_root: hex::encode(root),
                time,
                hash: format!("{:064x}", height),
                height,
            },
        );
    }

    pub fn header_calls(&self) -> usize {
        self.header_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlockExplorer for MockExplorer {
    async fn block_hash(&self, height: u64) -> Result<String, AnchorError> {
        self.blocks
            .lock()
            .get(&height)
            .map(|h| h.hash.clone())
            .ok_or_else(|| AnchorError::BlockFetchFailed {
                height,
                details: "mock: unknown block".into(),
            })
    }

    async fn block_header(&self, hash: &str) -> Result<BlockHeader, AnchorError> {
        self.header_call_count.fetch_add(1, Ordering::SeqCst);
        self.blocks
            .lock()
            .values()
            .find(|h| h.hash == hash)
            .cloned()
            .ok_or_else(|| AnchorError::ServiceError(format!("mock: unknown block {hash}")))
    }
}
