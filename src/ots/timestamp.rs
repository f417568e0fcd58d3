//! Timestamp proof tree
//!
//! A [`Timestamp`] is a tree of messages. Edges are [`Op`]s, and any node may
//! carry [`Attestation`]s. Every child's digest is the result of applying its
//! op to the parent's digest; children are only ever created by [`Timestamp::add`],
//! [`Timestamp::merge`] and [`Timestamp::deserialize`], all of which compute it.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DeserializationError, MergeError, ShrinkError};
use crate::ots::attestation::Attestation;
use crate::ots::op::{Op, MAX_MSG_LENGTH};
use crate::ots::ser::{Deserializer, Serializer};

/// Maximum nesting depth accepted when parsing
pub const RECURSION_LIMIT: usize = 256;

/// Proof that one or more attestations commit to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    digest: Vec<u8>,
    /// Sorted in canonical order; duplicates are kept
    attestations: Vec<Attestation>,
    ops: BTreeMap<Op, Timestamp>,
}

impl Timestamp {
    /// Create a bare node for `digest`
    #[must_use]
    pub fn new(digest: impl Into<Vec<u8>>) -> Self {
        Self {
            digest: digest.into(),
            attestations: Vec::new(),
            ops: BTreeMap::new(),
        }
    }

    /// Message this node commits to
    #[must_use]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Attestations on this node, in canonical order
    #[must_use]
    pub fn attestations(&self) -> &[Attestation] {
        &self.attestations
    }

    /// Outgoing edges in canonical order
    #[must_use]
    pub fn ops(&self) -> &BTreeMap<Op, Timestamp> {
        &self.ops
    }

    /// Child reached through `op`, if present
    #[must_use]
    pub fn child(&self, op: &Op) -> Option<&Timestamp> {
        self.ops.get(op)
    }

    /// Attach an attestation to this node, keeping canonical order
    pub fn add_attestation(&mut self, attestation: Attestation) {
        let pos = self.attestations.partition_point(|a| a <= &attestation);
        self.attestations.insert(pos, attestation);
    }

    /// Return the child for `op`, creating it when absent
    pub fn add(&mut self, op: Op) -> &mut Timestamp {
        use std::collections::btree_map::Entry;

        match self.ops.entry(op) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let digest = entry.key().apply(&self.digest);
                entry.insert(Timestamp::new(digest))
            }
        }
    }

    /// Fold every attestation and edge of `other` into this tree
    ///
    /// # Errors
    ///
    /// Returns [`MergeError`] if the two roots commit to different messages.
    pub fn merge(&mut self, other: &Timestamp) -> Result<(), MergeError> {
        if self.digest != other.digest {
            return Err(MergeError {
                left: hex::encode(&self.digest),
                right: hex::encode(&other.digest),
            });
        }

        self.merge_unchecked(other);
        Ok(())
    }

    /// Merge assuming both roots share a digest
    fn merge_unchecked(&mut self, other: &Timestamp) {
        for attestation in &other.attestations {
            self.add_attestation(attestation.clone());
        }

        for (op, child) in &other.ops {
            self.add(op.clone()).merge_unchecked(child);
        }
    }

    /// Every attestation in the tree with the digest of the node holding it
    ///
    /// Depth-first, own attestations before children, children in op order.
    #[must_use]
    pub fn all_attestations(&self) -> Vec<(&[u8], &Attestation)> {
        let mut out = Vec::new();
        self.collect_attestations(&mut out);
        out
    }

    fn collect_attestations<'a>(&'a self, out: &mut Vec<(&'a [u8], &'a Attestation)>) {
        for attestation in &self.attestations {
            out.push((self.digest.as_slice(), attestation));
        }
        for child in self.ops.values() {
            child.collect_attestations(out);
        }
    }

    /// Distinct attestations anywhere in the tree
    #[must_use]
    pub fn attestation_set(&self) -> BTreeSet<Attestation> {
        self.all_attestations()
            .into_iter()
            .map(|(_, a)| a.clone())
            .collect()
    }

    /// Digests of all leaf nodes
    #[must_use]
    pub fn all_tips(&self) -> BTreeSet<Vec<u8>> {
        let mut tips = BTreeSet::new();
        self.collect_tips(&mut tips);
        tips
    }

    fn collect_tips(&self, tips: &mut BTreeSet<Vec<u8>>) {
        if self.ops.is_empty() {
            tips.insert(self.digest.clone());
        }
        for child in self.ops.values() {
            child.collect_tips(tips);
        }
    }

    /// True when some node carries a Bitcoin attestation
    #[must_use]
    pub fn is_timestamp_complete(&self) -> bool {
        self.all_attestations().iter().any(|(_, a)| a.is_bitcoin())
    }

    /// Nodes carrying at least one attestation, without descending below them
    #[must_use]
    pub fn directly_verified(&self) -> Vec<&Timestamp> {
        if !self.attestations.is_empty() {
            return vec![self];
        }
        self.ops
            .values()
            .flat_map(Timestamp::directly_verified)
            .collect()
    }

    /// Mutable form of [`Timestamp::directly_verified`]; the nodes are disjoint
    pub fn directly_verified_mut(&mut self) -> Vec<&mut Timestamp> {
        if !self.attestations.is_empty() {
            return vec![self];
        }
        self.ops
            .values_mut()
            .flat_map(Timestamp::directly_verified_mut)
            .collect()
    }

    fn contains_attestation(&self, target: &Attestation) -> bool {
        self.attestations.contains(target)
            || self.ops.values().any(|c| c.contains_attestation(target))
    }

    /// Keep only the path to `target`, leaving it as the sole attestation
    fn retain_path_to(&mut self, target: &Attestation) {
        if self.attestations.contains(target) {
            self.attestations = vec![target.clone()];
            self.ops.clear();
            return;
        }

        self.attestations.clear();
        let keep = self
            .ops
            .iter()
            .find(|(_, child)| child.contains_attestation(target))
            .map(|(op, _)| op.clone());
        self.ops.retain(|op, _| Some(op) == keep.as_ref());

        if let Some(child) = self.ops.values_mut().next() {
            child.retain_path_to(target);
        }
    }

    /// Reduce the tree to its most useful attestation
    ///
    /// With more than one attestation, the lowest-height Bitcoin attestation
    /// wins and every branch not leading to it is removed. Without any
    /// Bitcoin attestation the first attestation is returned and the tree is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ShrinkError::NoAttestations`] for a tree without attestations.
    pub fn shrink(&mut self) -> Result<Attestation, ShrinkError> {
        let all = self.all_attestations();

        let first = match all.first() {
            Some((_, a)) => (*a).clone(),
            None => return Err(ShrinkError::NoAttestations),
        };
        if all.len() == 1 {
            return Ok(first);
        }

        let min_bitcoin = all
            .iter()
            .filter_map(|(_, a)| match a {
                Attestation::Bitcoin { height } => Some(*height),
                _ => None,
            })
            .min();

        let Some(height) = min_bitcoin else {
            return Ok(first);
        };

        let target = Attestation::Bitcoin { height };
        self.retain_path_to(&target);
        Ok(target)
    }

    /// Write the tree in canonical form
    ///
    /// A leaf with no attestations is written as a bare `0x00`, which
    /// [`Timestamp::deserialize`] rejects. Round trips need an attestation
    /// on every leaf.
    pub fn serialize(&self, ser: &mut Serializer) {
        if let Some((last, rest)) = self.attestations.split_last() {
            for attestation in rest {
                ser.write_bytes(&[0xff, 0x00]);
                attestation.serialize(ser);
            }

            if self.ops.is_empty() {
                ser.write_byte(0x00);
                last.serialize(ser);
                return;
            }

            ser.write_bytes(&[0xff, 0x00]);
            last.serialize(ser);
        } else if self.ops.is_empty() {
            ser.write_byte(0x00);
            return;
        }

        let count = self.ops.len();
        for (i, (op, child)) in self.ops.iter().enumerate() {
            if i + 1 < count {
                ser.write_byte(0xff);
            }
            op.serialize(ser);
            child.serialize(ser);
        }
    }

    /// Serialized bytes of the tree
    ///
    /// See [`Timestamp::serialize`] for trees with unattested leaves.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ser = Serializer::new();
        self.serialize(&mut ser);
        ser.into_bytes()
    }

    /// Parse a tree whose root message is `digest`
    ///
    /// The message is not part of the encoding, so it must be supplied; every
    /// child digest is recomputed from it while parsing.
    ///
    /// # Errors
    ///
    /// Returns a [`DeserializationError`] for malformed input, nesting deeper
    /// than [`RECURSION_LIMIT`] or an op result longer than 4096 bytes.
    pub fn deserialize(
        de: &mut Deserializer<'_>,
        digest: Vec<u8>,
    ) -> Result<Self, DeserializationError> {
        Self::deserialize_at(de, digest, 0)
    }

    /// Parse a complete buffer, rejecting trailing bytes
    ///
    /// # Errors
    ///
    /// See [`Timestamp::deserialize`].
    pub fn from_bytes(bytes: &[u8], digest: Vec<u8>) -> Result<Self, DeserializationError> {
        let mut de = Deserializer::new(bytes);
        let timestamp = Self::deserialize(&mut de, digest)?;
        de.assert_eof()?;
        Ok(timestamp)
    }

    fn deserialize_at(
        de: &mut Deserializer<'_>,
        digest: Vec<u8>,
        depth: usize,
    ) -> Result<Self, DeserializationError> {
        if depth > RECURSION_LIMIT {
            return Err(DeserializationError::RecursionLimit(RECURSION_LIMIT));
        }

        let mut node = Timestamp::new(digest);

        let mut tag = de.read_byte()?;
        while tag == 0xff {
            let current = de.read_byte()?;
            node.read_tagged(de, current, depth)?;
            tag = de.read_byte()?;
        }
        node.read_tagged(de, tag, depth)?;

        Ok(node)
    }

    fn read_tagged(
        &mut self,
        de: &mut Deserializer<'_>,
        tag: u8,
        depth: usize,
    ) -> Result<(), DeserializationError> {
        if tag == 0x00 {
            let attestation = Attestation::deserialize(de)?;
            self.add_attestation(attestation);
            return Ok(());
        }

        let op = Op::deserialize_with_tag(de, tag)?;
        let result = op.apply(&self.digest);
        if result.len() > MAX_MSG_LENGTH {
            return Err(DeserializationError::ResultTooLong {
                len: result.len(),
                max: MAX_MSG_LENGTH,
            });
        }

        let child = Self::deserialize_at(de, result, depth + 1)?;
        match self.ops.get_mut(&op) {
            // repeated edge, same op on the same digest
            Some(existing) => existing.merge_unchecked(&child),
            None => {
                self.ops.insert(op, child);
            }
        }
        Ok(())
    }
}
