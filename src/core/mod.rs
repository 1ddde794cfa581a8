//! Core ledger functionality
//!
//! This module contains the fundamental ledger components: blocks and
//! transactions, the proof-of-work engine, chain validation, and the ledger
//! that orchestrates them.

pub mod block;
pub mod ledger;
pub mod proof_of_work;
pub mod transaction;
pub mod validator;

pub use block::{Block, SealedBlock, GENESIS_PREVIOUS_HASH};
pub use ledger::{ChainSnapshot, Ledger, MineOutcome};
pub use proof_of_work::{MiningDelay, ProofOfWork, Target};
pub use transaction::Transaction;
pub use validator::{ChainFlaw, ChainValidator, ChainVerdict};
