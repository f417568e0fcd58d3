//! Merkle aggregation of many timestamps under one tip
//!
//! Leaves are paired left to right. A pair (left, right) becomes
//! `sha256(left || right)`: left reaches the concatenation through
//! `Append(right)`, right through `Prepend(left)`. An unpaired last element
//! carries over to the next level unchanged.
//!
//! The tree is built once, then every leaf timestamp gets the op path to the
//! tip replayed onto it and a copy of the tip merged at the end. Anything
//! merged into the tip before grafting (calendar responses, for example)
//! therefore reaches every leaf.

use sha2::{Digest, Sha256};

use crate::error::MergeError;
use crate::ots::op::Op;
use crate::ots::timestamp::Timestamp;

/// Aggregated tip plus the op path from each leaf to it
#[derive(Debug, Clone)]
pub struct MerkleTree {
    tip: Timestamp,
    paths: Vec<Vec<Op>>,
}

/// Working element of one level: current digest and the leaves under it
struct Group {
    digest: Vec<u8>,
    leaves: Vec<usize>,
}

impl MerkleTree {
    /// Build over leaf digests; `None` when there are no leaves
    #[must_use]
    pub fn new<D: AsRef<[u8]>>(leaf_digests: &[D]) -> Option<Self> {
        let mut paths: Vec<Vec<Op>> = vec![Vec::new(); leaf_digests.len()];
        let mut level: Vec<Group> = leaf_digests
            .iter()
            .enumerate()
            .map(|(i, d)| Group {
                digest: d.as_ref().to_vec(),
                leaves: vec![i],
            })
            .collect();

        loop {
            let mut iter = level.into_iter();
            let mut carry = Some(iter.next()?);
            let mut next = Vec::new();

            for group in iter {
                match carry.take() {
                    Some(left) => next.push(pair(left, group, &mut paths)),
                    None => carry = Some(group),
                }
            }

            if next.is_empty() {
                let root = carry?;
                return Some(Self {
                    tip: Timestamp::new(root.digest),
                    paths,
                });
            }
            if let Some(left_over) = carry {
                next.push(left_over);
            }
            level = next;
        }
    }

    /// Root node shared by all leaves
    #[must_use]
    pub fn tip(&self) -> &Timestamp {
        &self.tip
    }

    /// Mutable tip, for attaching calendar results before grafting
    pub fn tip_mut(&mut self) -> &mut Timestamp {
        &mut self.tip
    }

    /// Number of leaves
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Ops leading from leaf `index` to the tip
    #[must_use]
    pub fn path(&self, index: usize) -> Option<&[Op]> {
        self.paths.get(index).map(Vec::as_slice)
    }

    /// Replay leaf `index`'s path onto `leaf` and merge the tip at its end
    ///
    /// # Errors
    ///
    /// Returns [`MergeError`] when `leaf` is not the timestamp the tree was
    /// built from, so its path does not arrive at the tip digest.
    pub fn graft(&self, index: usize, leaf: &mut Timestamp) -> Result<(), MergeError> {
        let Some(path) = self.paths.get(index) else {
            return Err(MergeError {
                left: hex::encode(leaf.digest()),
                right: hex::encode(self.tip.digest()),
            });
        };

        let mut node = leaf;
        for op in path {
            node = node.add(op.clone());
        }
        node.merge(&self.tip)
    }
}

fn pair(left: Group, right: Group, paths: &mut [Vec<Op>]) -> Group {
    for &i in &left.leaves {
        paths[i].push(Op::Append(right.digest.clone()));
        paths[i].push(Op::Sha256);
    }
    for &i in &right.leaves {
        paths[i].push(Op::Prepend(left.digest.clone()));
        paths[i].push(Op::Sha256);
    }

    let mut hasher = Sha256::new();
    hasher.update(&left.digest);
    hasher.update(&right.digest);

    let mut leaves = left.leaves;
    leaves.extend(right.leaves);

    Group {
        digest: hasher.finalize().to_vec(),
        leaves,
    }
}

/// Aggregate `leaves` under a common tip and graft it into each of them
///
/// Returns the tip, or `None` for an empty slice.
pub fn make_merkle_tree(leaves: &mut [&mut Timestamp]) -> Option<Timestamp> {
    let digests: Vec<Vec<u8>> = leaves.iter().map(|l| l.digest().to_vec()).collect();
    let tree = MerkleTree::new(&digests)?;

    for (i, leaf) in leaves.iter_mut().enumerate() {
        // paths were computed from these exact digests
        if let Err(e) = tree.graft(i, leaf) {
            tracing::error!(leaf = i, error = %e, "Merkle graft failed");
        }
    }

    Some(tree.tip)
}
