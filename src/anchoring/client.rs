//! OpenTimestamps client
//!
//! Stamps files against calendar servers, upgrades pending proofs and
//! verifies blockchain attestations against block headers.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use rand::RngCore;

use crate::anchoring::bitcoin::BlockExplorer;
use crate::anchoring::calendar::RemoteCalendar;
use crate::anchoring::types::{BlockHeader, Chain, VerifyResult};
use crate::config::OtsConfig;
use crate::error::{OtsError, OtsResult, VerificationError};
use crate::ots::{Attestation, DetachedTimestampFile, MerkleTree, Op, Timestamp};

/// Random bytes appended to each file digest before aggregation
const NONCE_SIZE: usize = 16;

/// OpenTimestamps client
pub struct OpenTimestamps {
    /// Configuration
    config: OtsConfig,

    /// Calendar transport
    calendar: Arc<dyn RemoteCalendar>,

    /// Bitcoin block headers
    bitcoin: Arc<dyn BlockExplorer>,

    /// Litecoin block headers, if configured
    litecoin: Option<Arc<dyn BlockExplorer>>,
}

impl OpenTimestamps {
    /// Create a client over explicit collaborators
    pub fn new(
        config: OtsConfig,
        calendar: Arc<dyn RemoteCalendar>,
        bitcoin: Arc<dyn BlockExplorer>,
    ) -> Self {
        Self {
            config,
            calendar,
            bitcoin,
            litecoin: None,
        }
    }

    /// Enable Litecoin verification through `explorer`
    #[must_use]
    pub fn with_litecoin(mut self, explorer: Arc<dyn BlockExplorer>) -> Self {
        self.litecoin = Some(explorer);
        self
    }

    /// Create an HTTP-backed client from configuration
    ///
    /// Explorers are wrapped in [`CachedExplorer`](crate::anchoring::CachedExplorer).
    #[cfg(feature = "http")]
    pub fn from_config(config: OtsConfig) -> OtsResult<Self> {
        use crate::anchoring::bitcoin::EsploraExplorer;
        use crate::anchoring::cache::CachedExplorer;
        use crate::anchoring::calendar::HttpCalendar;

        let calendar = HttpCalendar::with_limit(config.timeout_secs, config.max_response_bytes)?;
        let bitcoin = CachedExplorer::new(
            EsploraExplorer::new(config.explorer_urls.clone(), config.timeout_secs)?,
            config.cache_capacity,
        );

        let litecoin: Option<Arc<dyn BlockExplorer>> = if config.litecoin_explorer_urls.is_empty()
        {
            None
        } else {
            Some(Arc::new(CachedExplorer::new(
                EsploraExplorer::new(config.litecoin_explorer_urls.clone(), config.timeout_secs)?,
                config.cache_capacity,
            )))
        };

        Ok(Self {
            config,
            calendar: Arc::new(calendar),
            bitcoin: Arc::new(bitcoin),
            litecoin,
        })
    }

    pub fn config(&self) -> &OtsConfig {
        &self.config
    }

    /// Human-readable description of a detached proof
    pub fn info(&self, file: &DetachedTimestampFile, verbose: bool) -> String {
        crate::ots::info(file, verbose)
    }

    /// Human-readable description of a bare timestamp
    pub fn info_timestamp(&self, timestamp: &Timestamp) -> String {
        crate::ots::info_timestamp(timestamp)
    }

    // ========== Stamping ==========

    /// Timestamp `files` in one aggregated submission
    ///
    /// Each file digest is salted with a random nonce, the salted leaves are
    /// combined into a merkle tree and the tip is submitted to every
    /// calendar concurrently. Calendar failures are logged; falling short
    /// of the quorum is logged as an error but still returns the proof.
    ///
    /// Returns the file's timestamp for a single file, otherwise the tip.
    ///
    /// # Errors
    ///
    /// [`OtsError::InvalidArgument`] for an empty file list, an empty
    /// calendar list or a quorum larger than the calendar count.
    pub async fn stamp(
        &self,
        files: &mut [DetachedTimestampFile],
        calendar_urls: &[String],
    ) -> OtsResult<Timestamp> {
        if files.is_empty() {
            return Err(OtsError::InvalidArgument("no files to stamp".into()));
        }

        let calendars = self.config.resolve_calendars(calendar_urls);
        if calendars.is_empty() {
            return Err(OtsError::InvalidArgument("no calendar URLs configured".into()));
        }

        let quorum = self
            .config
            .resolve_quorum(calendars.len(), calendar_urls.is_empty());
        if quorum == 0 || quorum > calendars.len() {
            return Err(OtsError::InvalidArgument(format!(
                "quorum {} out of range for {} calendars",
                quorum,
                calendars.len()
            )));
        }

        let mut nonces = Vec::with_capacity(files.len());
        let mut leaf_digests = Vec::with_capacity(files.len());
        {
            let mut rng = rand::thread_rng();
            for file in files.iter_mut() {
                let mut nonce = vec![0u8; NONCE_SIZE];
                rng.fill_bytes(&mut nonce);

                let leaf = salted_leaf(file, &nonce);
                leaf_digests.push(leaf.digest().to_vec());
                nonces.push(nonce);
            }
        }

        let mut tree = MerkleTree::new(&leaf_digests)
            .ok_or_else(|| OtsError::InvalidArgument("no files to stamp".into()))?;
        let tip_digest = tree.tip().digest().to_vec();

        tracing::info!(
            files = files.len(),
            calendars = calendars.len(),
            tip = %hex::encode(&tip_digest),
            "Submitting merkle tip to calendars"
        );

        let responses = join_all(calendars.iter().map(|url| {
            let digest = &tip_digest;
            async move { (url, self.calendar.submit(url, digest).await) }
        }))
        .await;

        let mut successes = 0usize;
        for (url, response) in responses {
            match response {
                Ok(timestamp) => match tree.tip_mut().merge(&timestamp) {
                    Ok(()) => successes += 1,
                    Err(e) => {
                        tracing::warn!(calendar_url = %url, error = %e, "Discarding calendar response")
                    }
                },
                Err(e) => {
                    tracing::warn!(calendar_url = %url, error = %e, "Calendar submission failed");
                }
            }
        }

        if successes < quorum {
            tracing::error!(
                successes = successes,
                quorum = quorum,
                "Failed to create timestamp: not enough calendar responses"
            );
        }

        for (index, (file, nonce)) in files.iter_mut().zip(&nonces).enumerate() {
            tree.graft(index, salted_leaf(file, nonce))?;
        }

        if files.len() == 1 {
            Ok(files[0].timestamp().clone())
        } else {
            Ok(tree.tip().clone())
        }
    }

    // ========== Upgrading ==========

    /// Fetch calendar upgrades for every pending, incomplete node
    ///
    /// Nodes are upgraded concurrently. Returns `true` when any calendar
    /// response was merged.
    pub async fn upgrade(&self, timestamp: &mut Timestamp) -> bool {
        let before = timestamp.attestation_set();

        let nodes: Vec<&mut Timestamp> = timestamp
            .directly_verified_mut()
            .into_iter()
            .filter(|node| {
                !node.is_timestamp_complete() && node.attestations().iter().any(Attestation::is_pending)
            })
            .collect();

        if nodes.is_empty() {
            tracing::debug!("No pending attestations to upgrade");
            return false;
        }

        let results = join_all(nodes.into_iter().map(|node| self.upgrade_node(node))).await;
        let changed = results.into_iter().any(|merged| merged);

        let added = timestamp.attestation_set().difference(&before).count();
        tracing::info!(new_attestations = added, "Upgrade finished");

        changed
    }

    /// Upgrade the timestamp inside a detached proof
    pub async fn upgrade_file(&self, file: &mut DetachedTimestampFile) -> bool {
        self.upgrade(file.timestamp_mut()).await
    }

    async fn upgrade_node(&self, node: &mut Timestamp) -> bool {
        let uris: Vec<String> = node
            .attestations()
            .iter()
            .filter_map(|a| match a {
                Attestation::Pending { uri } => Some(uri.clone()),
                _ => None,
            })
            .collect();
        let digest = node.digest().to_vec();

        let mut merged = false;
        for uri in uris {
            let result = self.calendar.get_timestamp(&uri, &digest).await;
            match result {
                Ok(Some(upgraded)) => match node.merge(&upgraded) {
                    Ok(()) => {
                        tracing::info!(calendar_url = %uri, "Got upgraded timestamp");
                        merged = true;
                    }
                    Err(e) => {
                        tracing::warn!(calendar_url = %uri, error = %e, "Discarding upgrade response")
                    }
                },
                Ok(None) => {
                    tracing::info!(calendar_url = %uri, "Timestamp not yet available");
                }
                Err(e) => {
                    tracing::warn!(calendar_url = %uri, error = %e, "Upgrade request failed");
                }
            }
        }
        merged
    }

    // ========== Verification ==========

    /// Verify every blockchain attestation in `timestamp`
    ///
    /// Returns the lowest attesting height per chain. Litecoin attestations
    /// are skipped unless a Litecoin explorer is configured.
    ///
    /// # Errors
    ///
    /// [`OtsError::Verification`] when a header does not commit to the
    /// attested digest; explorer failures as [`OtsError::Anchoring`].
    pub async fn verify(&self, timestamp: &Timestamp) -> OtsResult<BTreeMap<Chain, VerifyResult>> {
        let mut results: BTreeMap<Chain, VerifyResult> = BTreeMap::new();

        for (msg, attestation) in timestamp.all_attestations() {
            let (chain, height, explorer) = match attestation {
                Attestation::Bitcoin { height } => (Chain::Bitcoin, *height, &self.bitcoin),
                Attestation::Litecoin { height } => match &self.litecoin {
                    Some(explorer) => (Chain::Litecoin, *height, explorer),
                    None => {
                        tracing::warn!(height = *height, "No Litecoin explorer configured, skipping attestation");
                        continue;
                    }
                },
                other => {
                    tracing::debug!(attestation = %other, "Skipping attestation");
                    continue;
                }
            };

            let header = explorer.header_at(height).await?;
            verify_against_block(msg, height, &header)?;

            tracing::info!(
                chain = %chain,
                height = height,
                time = header.time,
                "Attestation verified"
            );

            let result = VerifyResult::new(Some(header.time), height);
            results
                .entry(chain)
                .and_modify(|best| {
                    if height < best.height {
                        *best = result;
                    }
                })
                .or_insert(result);
        }

        Ok(results)
    }

    /// Verify a detached proof after checking it covers `digest`
    pub async fn verify_file(
        &self,
        file: &DetachedTimestampFile,
        digest: &[u8],
    ) -> OtsResult<BTreeMap<Chain, VerifyResult>> {
        if file.file_digest() != digest {
            return Err(OtsError::FileDigestMismatch {
                expected: hex::encode(file.file_digest()),
                actual: hex::encode(digest),
            });
        }
        self.verify(file.timestamp()).await
    }
}

/// Leaf node `file digest -> append(nonce) -> sha256`
fn salted_leaf<'a>(file: &'a mut DetachedTimestampFile, nonce: &[u8]) -> &'a mut Timestamp {
    file.timestamp_mut()
        .add(Op::Append(nonce.to_vec()))
        .add(Op::Sha256)
}

/// Check that `header` commits to the attested `msg`
///
/// Block headers store the merkle root in internal byte order, explorers
/// display it reversed.
pub fn verify_against_block(
    msg: &[u8],
    height: u64,
    header: &BlockHeader,
) -> Result<(), VerificationError> {
    if msg.len() != 32 {
        return Err(VerificationError::BadDigestLength {
            height,
            len: msg.len(),
        });
    }

    if header.height != height {
        return Err(VerificationError::HeightMismatch {
            expected: height,
            actual: header.height,
        });
    }

    let mut reversed = msg.to_vec();
    reversed.reverse();
    let actual = hex::encode(reversed);

    if !actual.eq_ignore_ascii_case(&header.merkle_root) {
        return Err(VerificationError::MerkleRootMismatch {
            height,
            expected: header.merkle_root.clone(),
            actual,
        });
    }

    tracing::debug!(height = height, "Merkle root matches, assuming block is valid");
    Ok(())
}
