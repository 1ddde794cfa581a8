//! Announce hooks
//!
//! After a successful mine the ledger notifies an external collaborator with
//! the miner's identity and the newly sealed block. The core only owns this
//! interface point; the concrete transport is pluggable.

pub mod file;

pub use file::{AnnounceRecord, FileAnnounce};

use crate::core::SealedBlock;
use crate::error::Result;

/// Notification seam between the ledger and its persistence/broadcast layer
pub trait Announce: Send + Sync {
    fn announce(&self, miner: &str, block: &SealedBlock) -> Result<()>;
}

/// Default collaborator: a ledger that tells no one
pub struct NullAnnounce;

impl Announce for NullAnnounce {
    fn announce(&self, _miner: &str, _block: &SealedBlock) -> Result<()> {
        Ok(())
    }
}
