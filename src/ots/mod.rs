//! OpenTimestamps proof format
//!
//! Pure, synchronous proof handling: the binary codec, the timestamp tree,
//! Merkle aggregation and `.ots` files. Network access lives in
//! [`crate::anchoring`].

pub mod attestation;
pub mod detached;
pub mod display;
pub mod merkle;
pub mod op;
pub mod ser;
pub mod timestamp;

pub use attestation::Attestation;
pub use detached::DetachedTimestampFile;
pub use display::{info, info_timestamp};
pub use merkle::{make_merkle_tree, MerkleTree};
pub use op::Op;
pub use ser::{Deserializer, Serializer};
pub use timestamp::Timestamp;
