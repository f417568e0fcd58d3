//! Proof engine error types

use thiserror::Error;

use crate::anchoring::AnchorError;

/// Result alias for proof engine operations
pub type OtsResult<T> = Result<T, OtsError>;

/// Malformed or truncated binary input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializationError {
    // ========== Stream Errors ==========
    /// Stream ended before a fixed-size read completed
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// Bytes left over after a complete structure
    #[error("{0} trailing bytes after end of proof")]
    TrailingBytes(usize),

    /// Header magic did not match
    #[error("bad magic bytes: not an OpenTimestamps proof")]
    BadMagic,

    /// Major version other than 1
    #[error("unsupported major version: {0}")]
    UnsupportedVersion(u64),

    // ========== Primitive Errors ==========
    /// varuint wider than 64 bits
    #[error("varuint overflows 64 bits")]
    VaruintOverflow,

    /// varbytes length above the allowed maximum
    #[error("varbytes length {len} exceeds maximum {max}")]
    VarbytesTooLong { len: u64, max: usize },

    /// varbytes length below the allowed minimum
    #[error("varbytes length {len} below minimum {min}")]
    VarbytesTooShort { len: usize, min: usize },

    // ========== Structure Errors ==========
    /// Tag byte that names no known operation
    #[error("unknown operation tag: 0x{0:02x}")]
    UnknownOpTag(u8),

    /// File hash op is not a cryptographic hash
    #[error("expected a crypto operation, got tag 0x{0:02x}")]
    NotCryptoOp(u8),

    /// File digest length does not match the file hash op
    #[error("file digest is {actual} bytes, hash op produces {expected}")]
    DigestLength { expected: usize, actual: usize },

    /// Nesting deeper than the recursion limit
    #[error("recursion limit of {0} exceeded")]
    RecursionLimit(usize),

    /// Applying an op produced a message longer than allowed
    #[error("operation result of {len} bytes exceeds maximum {max}")]
    ResultTooLong { len: usize, max: usize },

    /// Pending attestation URI with a disallowed character
    #[error("invalid character in pending URI: {0:?}")]
    InvalidUri(char),

    /// Attestation payload had unread bytes or a bad inner value
    #[error("malformed attestation payload: {0}")]
    BadAttestationPayload(String),
}

/// Attempt to merge timestamps over different digests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot merge timestamps for different messages: {left} != {right}")]
pub struct MergeError {
    pub left: String,
    pub right: String,
}

/// Shrink over a tree with nothing to keep
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShrinkError {
    #[error("timestamp has no attestations")]
    NoAttestations,
}

/// A blockchain attestation that does not match the block header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Attested digest is not a 32-byte merkle root
    #[error("expected a 32-byte digest for block {height}, got {len} bytes")]
    BadDigestLength { height: u64, len: usize },

    /// Reversed digest differs from the header's merkle root
    #[error("digest does not match merkle root of block {height}: expected {expected}, got {actual}")]
    MerkleRootMismatch {
        height: u64,
        expected: String,
        actual: String,
    },

    /// Explorer returned a header for a different height
    #[error("explorer returned block {actual} for height {expected}")]
    HeightMismatch { expected: u64, actual: u64 },
}

/// Top-level error for the proof engine
#[derive(Debug, Error)]
pub enum OtsError {
    // ========== Proof Errors ==========
    #[error("deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("shrink error: {0}")]
    Shrink(#[from] ShrinkError),

    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),

    // ========== Anchoring Errors ==========
    /// Calendar or block explorer failure
    #[error("anchoring error: {0}")]
    Anchoring(#[from] AnchorError),

    // ========== Caller Errors ==========
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Digest supplied for verification differs from the proof's file digest
    #[error("file digest mismatch: proof covers {expected}, got {actual}")]
    FileDigestMismatch { expected: String, actual: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
