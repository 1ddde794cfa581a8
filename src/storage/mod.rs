//! Pending transaction storage
//!
//! This module holds the pool of transactions waiting to be sealed into a
//! block. The chain itself lives on the ledger; nothing here persists past
//! the process.

pub mod pending_pool;

pub use pending_pool::PendingPool;
