//! Detached timestamp files (`.ots`)
//!
//! Format:
//! ```text
//! magic (31 bytes) | varuint major version | file hash op tag | file digest | timestamp
//! ```

use std::io::Read;

use crate::error::{DeserializationError, OtsResult};
use crate::ots::op::Op;
use crate::ots::ser::{Deserializer, Serializer};
use crate::ots::timestamp::Timestamp;

/// Header magic identifying an OpenTimestamps proof
pub const HEADER_MAGIC: [u8; 31] = [
    0x00, 0x4f, 0x70, 0x65, 0x6e, 0x54, 0x69, 0x6d, 0x65, 0x73, 0x74, 0x61, 0x6d, 0x70, 0x73, 0x00,
    0x00, 0x50, 0x72, 0x6f, 0x6f, 0x66, 0x00, 0xbf, 0x89, 0xe2, 0xe8, 0x84, 0xe8, 0x92, 0x94,
];

/// Only supported major version
pub const MAJOR_VERSION: u64 = 1;

/// A timestamp over a file digest, with the hash op that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedTimestampFile {
    file_hash_op: Op,
    timestamp: Timestamp,
}

impl DetachedTimestampFile {
    /// Wrap an existing timestamp
    ///
    /// # Errors
    ///
    /// Returns [`DeserializationError::NotCryptoOp`] when `file_hash_op` is not
    /// a hash, and [`DeserializationError::DigestLength`] when the digest
    /// length does not fit the op.
    pub fn new(file_hash_op: Op, timestamp: Timestamp) -> Result<Self, DeserializationError> {
        let Some(len) = file_hash_op.digest_len() else {
            return Err(DeserializationError::NotCryptoOp(file_hash_op.tag()));
        };
        if timestamp.digest().len() != len {
            return Err(DeserializationError::DigestLength {
                expected: len,
                actual: timestamp.digest().len(),
            });
        }

        Ok(Self {
            file_hash_op,
            timestamp,
        })
    }

    /// Hash `bytes` with `file_hash_op` and start an empty timestamp over it
    ///
    /// # Errors
    ///
    /// Returns an error when `file_hash_op` is not a hash op.
    pub fn from_bytes(file_hash_op: Op, bytes: &[u8]) -> OtsResult<Self> {
        Self::from_reader(file_hash_op, bytes)
    }

    /// Stream `reader` through `file_hash_op` and start an empty timestamp
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the reader, or an error when `file_hash_op`
    /// is not a hash op.
    pub fn from_reader<R: Read>(file_hash_op: Op, reader: R) -> OtsResult<Self> {
        if !file_hash_op.is_crypto() {
            return Err(DeserializationError::NotCryptoOp(file_hash_op.tag()).into());
        }
        let digest = file_hash_op.hash_reader(reader)?;
        Ok(Self {
            file_hash_op,
            timestamp: Timestamp::new(digest),
        })
    }

    /// Start an empty timestamp over an already computed digest
    ///
    /// # Errors
    ///
    /// See [`DetachedTimestampFile::new`].
    pub fn from_digest(file_hash_op: Op, digest: Vec<u8>) -> Result<Self, DeserializationError> {
        Self::new(file_hash_op, Timestamp::new(digest))
    }

    #[must_use]
    pub fn file_hash_op(&self) -> &Op {
        &self.file_hash_op
    }

    /// Digest of the file
    #[must_use]
    pub fn file_digest(&self) -> &[u8] {
        self.timestamp.digest()
    }

    #[must_use]
    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn timestamp_mut(&mut self) -> &mut Timestamp {
        &mut self.timestamp
    }

    #[must_use]
    pub fn into_timestamp(self) -> Timestamp {
        self.timestamp
    }

    /// Write the full `.ots` encoding
    pub fn serialize(&self, ser: &mut Serializer) {
        ser.write_bytes(&HEADER_MAGIC);
        ser.write_varuint(MAJOR_VERSION);
        self.file_hash_op.serialize(ser);
        ser.write_bytes(self.timestamp.digest());
        self.timestamp.serialize(ser);
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut ser = Serializer::new();
        self.serialize(&mut ser);
        ser.into_bytes()
    }

    /// Parse a complete `.ots` buffer
    ///
    /// # Errors
    ///
    /// Returns a [`DeserializationError`] for a bad magic, an unsupported
    /// major version, a non-hash file op, a malformed timestamp or trailing
    /// bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, DeserializationError> {
        let mut de = Deserializer::new(bytes);

        de.assert_magic(&HEADER_MAGIC)?;

        let version = de.read_varuint()?;
        if version != MAJOR_VERSION {
            return Err(DeserializationError::UnsupportedVersion(version));
        }

        let file_hash_op = Op::deserialize(&mut de)?;
        let Some(len) = file_hash_op.digest_len() else {
            return Err(DeserializationError::NotCryptoOp(file_hash_op.tag()));
        };

        let digest = de.read_bytes(len)?.to_vec();
        let timestamp = Timestamp::deserialize(&mut de, digest)?;

        de.assert_eof()?;

        Ok(Self {
            file_hash_op,
            timestamp,
        })
    }
}
