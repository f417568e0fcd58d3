//! Attestations: the leaves of a timestamp tree
//!
//! An attestation states that the message of the node it sits on was
//! committed to some external notary. On the wire it is an 8-byte tag
//! followed by a length-prefixed payload.

use std::cmp::Ordering;
use std::fmt;

use crate::error::DeserializationError;
use crate::ots::ser::{Deserializer, Serializer};

/// Length of every attestation tag
pub const TAG_SIZE: usize = 8;

/// Maximum length of an attestation payload
pub const MAX_PAYLOAD_SIZE: usize = 8192;

/// Maximum length of a pending calendar URI
pub const MAX_URI_LENGTH: usize = 1000;

pub const BITCOIN_TAG: [u8; TAG_SIZE] = [0x05, 0x88, 0x96, 0x0d, 0x73, 0xd7, 0x19, 0x01];
pub const LITECOIN_TAG: [u8; TAG_SIZE] = [0x06, 0x86, 0x9a, 0x0d, 0x73, 0xd7, 0x1b, 0x45];
pub const ETHEREUM_TAG: [u8; TAG_SIZE] = [0x30, 0xfe, 0x80, 0x87, 0xb5, 0xc7, 0xea, 0xd7];
pub const PENDING_TAG: [u8; TAG_SIZE] = [0x83, 0xdf, 0xe3, 0x0d, 0x2e, 0xf9, 0x0c, 0x8e];

/// A statement that a message was notarized
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attestation {
    /// Message is the merkle root of the Bitcoin block at `height`
    Bitcoin { height: u64 },
    /// Message is the merkle root of the Litecoin block at `height`
    Litecoin { height: u64 },
    /// Message is committed in the Ethereum block at `height`
    Ethereum { height: u64 },
    /// Calendar at `uri` promises a future blockchain attestation
    Pending { uri: String },
    /// Attestation type this library does not understand
    Unknown { tag: [u8; TAG_SIZE], payload: Vec<u8> },
}

impl Attestation {
    /// Wire tag
    #[must_use]
    pub fn tag(&self) -> [u8; TAG_SIZE] {
        match self {
            Attestation::Bitcoin { .. } => BITCOIN_TAG,
            Attestation::Litecoin { .. } => LITECOIN_TAG,
            Attestation::Ethereum { .. } => ETHEREUM_TAG,
            Attestation::Pending { .. } => PENDING_TAG,
            Attestation::Unknown { tag, .. } => *tag,
        }
    }

    /// Block height for blockchain attestations
    #[must_use]
    pub fn height(&self) -> Option<u64> {
        match self {
            Attestation::Bitcoin { height }
            | Attestation::Litecoin { height }
            | Attestation::Ethereum { height } => Some(*height),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_bitcoin(&self) -> bool {
        matches!(self, Attestation::Bitcoin { .. })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Attestation::Pending { .. })
    }

    fn payload(&self) -> Vec<u8> {
        let mut ser = Serializer::new();
        match self {
            Attestation::Bitcoin { height }
            | Attestation::Litecoin { height }
            | Attestation::Ethereum { height } => ser.write_varuint(*height),
            Attestation::Pending { uri } => ser.write_varbytes(uri.as_bytes()),
            Attestation::Unknown { payload, .. } => ser.write_bytes(payload),
        }
        ser.into_bytes()
    }

    /// Write tag and length-prefixed payload
    pub fn serialize(&self, ser: &mut Serializer) {
        ser.write_bytes(&self.tag());
        ser.write_varbytes(&self.payload());
    }

    /// Read an attestation (tag, then payload)
    ///
    /// Known payloads must be consumed exactly; unknown payloads are kept
    /// opaque so they survive a round trip.
    ///
    /// # Errors
    ///
    /// Returns a [`DeserializationError`] on truncation, an oversized payload,
    /// trailing payload bytes or an invalid pending URI.
    pub fn deserialize(de: &mut Deserializer<'_>) -> Result<Self, DeserializationError> {
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(de.read_bytes(TAG_SIZE)?);

        let payload = de.read_varbytes(MAX_PAYLOAD_SIZE, 0)?;
        let mut inner = Deserializer::new(payload);

        let attestation = match tag {
            BITCOIN_TAG => Attestation::Bitcoin {
                height: inner.read_varuint()?,
            },
            LITECOIN_TAG => Attestation::Litecoin {
                height: inner.read_varuint()?,
            },
            ETHEREUM_TAG => Attestation::Ethereum {
                height: inner.read_varuint()?,
            },
            PENDING_TAG => {
                let raw = inner.read_varbytes(MAX_URI_LENGTH, 0)?;
                Attestation::Pending {
                    uri: check_uri(raw)?,
                }
            }
            _ => {
                return Ok(Attestation::Unknown {
                    tag,
                    payload: payload.to_vec(),
                })
            }
        };

        inner.assert_eof().map_err(|e| {
            DeserializationError::BadAttestationPayload(format!("{}: {}", attestation, e))
        })?;

        Ok(attestation)
    }

    fn sort_key(&self) -> SortKey<'_> {
        match self {
            Attestation::Bitcoin { height }
            | Attestation::Litecoin { height }
            | Attestation::Ethereum { height } => SortKey::Height(*height),
            Attestation::Pending { uri } => SortKey::Bytes(uri.as_bytes()),
            Attestation::Unknown { payload, .. } => SortKey::Bytes(payload),
        }
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Height(u64),
    Bytes(&'a [u8]),
}

/// Validate a pending URI against the allowed character set
fn check_uri(raw: &[u8]) -> Result<String, DeserializationError> {
    for &b in raw {
        let c = b as char;
        let allowed = c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | ':' | '-');
        if !allowed {
            return Err(DeserializationError::InvalidUri(c));
        }
    }
    // ASCII-only after the check above
    Ok(raw.iter().map(|&b| b as char).collect())
}

impl Ord for Attestation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag()
            .cmp(&other.tag())
            .then_with(|| self.sort_key().cmp(&other.sort_key()))
    }
}

impl PartialOrd for Attestation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Attestation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attestation::Bitcoin { height } => write!(f, "BitcoinBlockHeaderAttestation({})", height),
            Attestation::Litecoin { height } => {
                write!(f, "LitecoinBlockHeaderAttestation({})", height)
            }
            Attestation::Ethereum { height } => {
                write!(f, "EthereumBlockHeaderAttestation({})", height)
            }
            Attestation::Pending { uri } => write!(f, "PendingAttestation('{}')", uri),
            Attestation::Unknown { tag, payload } => write!(
                f,
                "UnknownAttestation({}, {})",
                hex::encode(tag),
                hex::encode(payload)
            ),
        }
    }
}
