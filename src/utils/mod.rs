//! Utility functions and helpers
//!
//! This module contains the hashing and timestamp utilities and the
//! serialization functions used throughout the ledger.

pub mod crypto;
pub mod serialization;

pub use crypto::{current_timestamp, sha256_digest};

pub use serialization::{deserialize, serialize};
