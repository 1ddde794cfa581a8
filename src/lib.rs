//! # Anvil Chain - My Educational Proof-of-Work Ledger
//!
//! This is my single-node proof-of-work ledger, built in Rust to show the
//! integrity machinery of a blockchain without the distractions of a full
//! cryptocurrency. When I come back to this code, here's what I need to
//! remember:
//!
//! ## What I Built
//! - **Hash-Linked Chain**: An in-memory, append-only sequence of sealed blocks
//! - **Two-Phase Blocks**: An unsealed block never contains its own digest,
//!   so the hash can never leak into its own preimage
//! - **Proof-of-Work Engine**: A nonce search against a big-integer target
//!   equivalent to "d leading zero hex characters"
//! - **Chain Validator**: Independent replay that re-derives every digest and
//!   reports exactly which block and which check failed
//! - **Pending Pool**: Insertion-ordered holding area drained atomically on a
//!   successful mine
//! - **Announce Hook**: A pluggable seam where persistence or broadcast would
//!   plug in; the default file transport writes a local marker file
//!
//! ## How I Organized My Code
//! - `core/`: The heart of the ledger (blocks, transactions, mining,
//!   validation, orchestration)
//! - `storage/`: The pending transaction pool
//! - `announce/`: The notification seam and its file-backed implementation
//! - `config/`: Environment-driven configuration
//! - `utils/`: Hashing, timestamps, serialization helpers
//! - `cli/`: Command-line interface for the demo binary
//!
//! ## Key Design Decisions I Made
//! - Sealing is explicit: `Block::seal` produces a `SealedBlock`, and only
//!   the ledger seals, only after re-verifying the proof it was handed
//! - Validation operates on deep-copied snapshots so it can never corrupt or
//!   be corrupted by a concurrent mine
//! - Append failures leave the chain and pool untouched; retrying `mine()`
//!   is always safe
//!
//! Remember: I built this to be educational but honest - every append is
//! re-verified, even the ones this very process mined.

pub mod announce;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use announce::{Announce, AnnounceRecord, FileAnnounce, NullAnnounce};
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{
    Block, ChainFlaw, ChainSnapshot, ChainValidator, ChainVerdict, Ledger, MineOutcome,
    MiningDelay, ProofOfWork, SealedBlock, Target, Transaction, GENESIS_PREVIOUS_HASH,
};
pub use error::{LedgerError, Result};
pub use storage::PendingPool;
pub use utils::{current_timestamp, deserialize, serialize, sha256_digest};
