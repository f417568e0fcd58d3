//! Timestamp operations
//!
//! Each edge of a timestamp tree is an [`Op`] that maps the parent's message
//! to the child's. Variants are declared in tag order so the derived `Ord`
//! is the canonical serialization order: by tag, then by argument bytes.

use std::fmt;

use sha1::Sha1;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::error::DeserializationError;
use crate::ots::ser::{Deserializer, Serializer};

/// Maximum length of an append/prepend argument
pub const MAX_OP_ARG_LENGTH: usize = 4096;

/// Maximum length of any message produced by an op
pub const MAX_MSG_LENGTH: usize = 4096;

const TAG_SHA1: u8 = 0x02;
const TAG_RIPEMD160: u8 = 0x03;
const TAG_SHA256: u8 = 0x08;
const TAG_KECCAK256: u8 = 0x67;
const TAG_APPEND: u8 = 0xf0;
const TAG_PREPEND: u8 = 0xf1;
const TAG_REVERSE: u8 = 0xf2;
const TAG_HEXLIFY: u8 = 0xf3;

/// A single message transformation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    Sha1,
    Ripemd160,
    Sha256,
    Keccak256,
    Append(Vec<u8>),
    Prepend(Vec<u8>),
    Reverse,
    Hexlify,
}

impl Op {
    /// Wire tag byte
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Op::Sha1 => TAG_SHA1,
            Op::Ripemd160 => TAG_RIPEMD160,
            Op::Sha256 => TAG_SHA256,
            Op::Keccak256 => TAG_KECCAK256,
            Op::Append(_) => TAG_APPEND,
            Op::Prepend(_) => TAG_PREPEND,
            Op::Reverse => TAG_REVERSE,
            Op::Hexlify => TAG_HEXLIFY,
        }
    }

    /// Lowercase name used in tree rendering
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Op::Sha1 => "sha1",
            Op::Ripemd160 => "ripemd160",
            Op::Sha256 => "sha256",
            Op::Keccak256 => "keccak256",
            Op::Append(_) => "append",
            Op::Prepend(_) => "prepend",
            Op::Reverse => "reverse",
            Op::Hexlify => "hexlify",
        }
    }

    /// Argument bytes for binary ops
    #[must_use]
    pub fn arg(&self) -> Option<&[u8]> {
        match self {
            Op::Append(arg) | Op::Prepend(arg) => Some(arg),
            _ => None,
        }
    }

    /// True for the hash ops usable as a file hash op
    #[must_use]
    pub fn is_crypto(&self) -> bool {
        self.digest_len().is_some()
    }

    /// Output length of a crypto op
    #[must_use]
    pub fn digest_len(&self) -> Option<usize> {
        match self {
            Op::Sha1 | Op::Ripemd160 => Some(20),
            Op::Sha256 | Op::Keccak256 => Some(32),
            _ => None,
        }
    }

    /// Apply the op to `msg`
    #[must_use]
    pub fn apply(&self, msg: &[u8]) -> Vec<u8> {
        match self {
            Op::Sha1 => Sha1::digest(msg).to_vec(),
            Op::Ripemd160 => ripemd::Ripemd160::digest(msg).to_vec(),
            Op::Sha256 => Sha256::digest(msg).to_vec(),
            Op::Keccak256 => Keccak256::digest(msg).to_vec(),
            Op::Append(arg) => {
                let mut out = Vec::with_capacity(msg.len() + arg.len());
                out.extend_from_slice(msg);
                out.extend_from_slice(arg);
                out
            }
            Op::Prepend(arg) => {
                let mut out = Vec::with_capacity(msg.len() + arg.len());
                out.extend_from_slice(arg);
                out.extend_from_slice(msg);
                out
            }
            Op::Reverse => msg.iter().rev().copied().collect(),
            Op::Hexlify => hex::encode(msg).into_bytes(),
        }
    }

    /// Hash everything `reader` yields with this crypto op
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the reader, or `InvalidInput` when called on
    /// a non-crypto op.
    pub fn hash_reader<R: std::io::Read>(&self, mut reader: R) -> std::io::Result<Vec<u8>> {
        fn stream<D: Digest, R: std::io::Read>(reader: &mut R) -> std::io::Result<Vec<u8>> {
            let mut hasher = D::new();
            let mut buf = [0u8; 8192];
            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    return Ok(hasher.finalize().to_vec());
                }
                hasher.update(&buf[..n]);
            }
        }

        match self {
            Op::Sha1 => stream::<Sha1, _>(&mut reader),
            Op::Ripemd160 => stream::<ripemd::Ripemd160, _>(&mut reader),
            Op::Sha256 => stream::<Sha256, _>(&mut reader),
            Op::Keccak256 => stream::<Keccak256, _>(&mut reader),
            other => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a hash operation", other.name()),
            )),
        }
    }

    /// Write tag and argument
    pub fn serialize(&self, ser: &mut Serializer) {
        ser.write_byte(self.tag());
        if let Some(arg) = self.arg() {
            ser.write_varbytes(arg);
        }
    }

    /// Read the op's argument given an already-consumed tag byte
    ///
    /// # Errors
    ///
    /// Returns [`DeserializationError::UnknownOpTag`] for unassigned tags and
    /// a varbytes error when a binary argument is out of bounds.
    pub fn deserialize_with_tag(
        de: &mut Deserializer<'_>,
        tag: u8,
    ) -> Result<Self, DeserializationError> {
        let op = match tag {
            TAG_SHA1 => Op::Sha1,
            TAG_RIPEMD160 => Op::Ripemd160,
            TAG_SHA256 => Op::Sha256,
            TAG_KECCAK256 => Op::Keccak256,
            TAG_APPEND => Op::Append(de.read_varbytes(MAX_OP_ARG_LENGTH, 1)?.to_vec()),
            TAG_PREPEND => Op::Prepend(de.read_varbytes(MAX_OP_ARG_LENGTH, 1)?.to_vec()),
            TAG_REVERSE => Op::Reverse,
            TAG_HEXLIFY => Op::Hexlify,
            other => return Err(DeserializationError::UnknownOpTag(other)),
        };
        Ok(op)
    }

    /// Read a tag byte and the op it names
    ///
    /// # Errors
    ///
    /// See [`Op::deserialize_with_tag`].
    pub fn deserialize(de: &mut Deserializer<'_>) -> Result<Self, DeserializationError> {
        let tag = de.read_byte()?;
        Self::deserialize_with_tag(de, tag)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.arg() {
            Some(arg) => write!(f, "{} {}", self.name(), hex::encode(arg)),
            None => f.write_str(self.name()),
        }
    }
}
