//! Calendar, block explorer and client orchestration

pub mod bitcoin;
pub mod cache;
pub mod calendar;
pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
mod mock;

pub use bitcoin::{BlockExplorer, DEFAULT_BITCOIN_EXPLORERS};
pub use cache::{CachedExplorer, LruCache, DEFAULT_CACHE_CAPACITY};
pub use calendar::{RemoteCalendar, DEFAULT_MAX_RESPONSE_BYTES, OTS_ACCEPT};
pub use client::{verify_against_block, OpenTimestamps};
pub use error::AnchorError;
pub use types::{BlockHeader, Chain, VerifyResult};

#[cfg(feature = "http")]
pub use bitcoin::EsploraExplorer;

#[cfg(feature = "http")]
pub use calendar::HttpCalendar;
