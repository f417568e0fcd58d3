//! ots-client library exports

pub mod anchoring;
pub mod config;
pub mod error;
pub mod ots;

// Re-exports
pub use anchoring::{AnchorError, Chain, OpenTimestamps, VerifyResult};
pub use config::OtsConfig;
pub use error::{OtsError, OtsResult};
pub use ots::{Attestation, DetachedTimestampFile, Op, Timestamp};
