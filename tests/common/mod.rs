//! Shared test infrastructure
//!
//! - Real proofs captured from Nostr events
//! - In-memory calendar and block explorer

pub mod fixtures;
pub mod memory;

pub use fixtures::*;
pub use memory::*;
