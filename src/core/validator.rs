use crate::core::{ProofOfWork, SealedBlock, GENESIS_PREVIOUS_HASH};
use log::error;
use std::fmt;

/// Which of the two per-block checks failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainFlaw {
    /// The stored hash fails the validity predicate for the block's content
    InvalidProof,
    /// The block's previous_hash does not match the prior block's hash
    BrokenLinkage,
}

impl fmt::Display for ChainFlaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainFlaw::InvalidProof => write!(f, "invalid proof"),
            ChainFlaw::BrokenLinkage => write!(f, "broken linkage"),
        }
    }
}

/// Outcome of replaying a chain. Validation failures are data, not errors:
/// replaying an untrusted chain is an expected use case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainVerdict {
    Valid,
    Invalid { index: usize, flaw: ChainFlaw },
}

impl ChainVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, ChainVerdict::Valid)
    }
}

impl fmt::Display for ChainVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainVerdict::Valid => write!(f, "chain valid"),
            ChainVerdict::Invalid { index, flaw } => {
                write!(f, "chain invalid at block {index}: {flaw}")
            }
        }
    }
}

/// Independent re-verification of a whole chain against a fixed difficulty.
/// The validator only ever reads the snapshot it is given; it cannot touch a
/// live ledger, so validation and mining never interfere.
pub struct ChainValidator {
    difficulty: u32,
}

impl ChainValidator {
    pub fn new(difficulty: u32) -> ChainValidator {
        ChainValidator { difficulty }
    }

    /// Walk the chain from index 0, re-deriving every digest from the
    /// unsealed view and tracking the expected previous hash from the "0"
    /// sentinel. Stops at the first failing block and reports which check
    /// broke. An empty chain has nothing to refute and is vacuously valid.
    pub fn validate_chain(&self, chain: &[SealedBlock]) -> ChainVerdict {
        let mut expected_previous_hash = GENESIS_PREVIOUS_HASH;

        for (index, sealed) in chain.iter().enumerate() {
            let stored_hash = sealed.get_hash();

            if !ProofOfWork::is_valid_proof(sealed.get_block(), stored_hash, self.difficulty) {
                error!("Invalid proof {stored_hash} for block {index}");
                return ChainVerdict::Invalid {
                    index,
                    flaw: ChainFlaw::InvalidProof,
                };
            }

            if sealed.get_previous_hash() != expected_previous_hash {
                error!(
                    "Invalid previous hash {} for block {index}, expected {expected_previous_hash}",
                    sealed.get_previous_hash()
                );
                return ChainVerdict::Invalid {
                    index,
                    flaw: ChainFlaw::BrokenLinkage,
                };
            }

            expected_previous_hash = stored_hash;
        }

        ChainVerdict::Valid
    }

    /// The primary boolean contract over [`validate_chain`]
    ///
    /// [`validate_chain`]: ChainValidator::validate_chain
    pub fn check_chain_validity(&self, chain: &[SealedBlock]) -> bool {
        self.validate_chain(chain).is_valid()
    }
}
