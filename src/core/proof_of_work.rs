use crate::core::Block;
use crate::error::Result;
use crate::utils::sha256_digest;
use data_encoding::HEXLOWER;
use num_bigint::{BigInt, Sign};
use rand::Rng;
use std::borrow::Borrow;
use std::ops::ShlAssign;
use std::thread;
use std::time::Duration;

/// Numeric form of the difficulty predicate: a digest meets difficulty `d`
/// exactly when its integer value is below `1 << (256 - 4d)`, which is the
/// same as starting with `d` zero characters in lowercase hex.
pub struct Target {
    bound: BigInt,
}

impl Target {
    pub fn from_difficulty(difficulty: u32) -> Target {
        // Difficulties past the digest width all demand the all-zero digest
        let difficulty = difficulty.min(64);
        let mut bound = BigInt::from(1);
        bound.shl_assign(256 - 4 * difficulty);
        Target { bound }
    }

    pub fn is_met_by(&self, digest: &[u8]) -> bool {
        let digest_int = BigInt::from_bytes_be(Sign::Plus, digest);
        digest_int.lt(self.bound.borrow())
    }

    /// Check a claimed digest in its hex form. Anything that is not a
    /// canonical 64-character lowercase hex digest does not meet any target.
    pub fn is_met_by_hex(&self, digest_hex: &str) -> bool {
        if digest_hex.len() != 64 {
            return false;
        }
        match HEXLOWER.decode(digest_hex.as_bytes()) {
            Ok(digest) => self.is_met_by(digest.as_slice()),
            Err(_) => false,
        }
    }
}

/// Per-attempt delay policy for the nonce search. The original network shipped
/// a "difficulty bomb" that slept a random interval after every failed
/// attempt; it throttles throughput but never changes which nonce is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MiningDelay {
    #[default]
    None,
    Fixed {
        millis: u64,
    },
    RandomBounded {
        max_millis: u64,
    },
}

impl MiningDelay {
    /// The classic difficulty bomb: up to a tenth of a second per failed attempt
    pub fn difficulty_bomb() -> MiningDelay {
        MiningDelay::RandomBounded { max_millis: 100 }
    }

    fn pause(&self) {
        match self {
            MiningDelay::None => {}
            MiningDelay::Fixed { millis } => thread::sleep(Duration::from_millis(*millis)),
            MiningDelay::RandomBounded { max_millis } => {
                let millis = rand::thread_rng().gen_range(0..=*max_millis);
                thread::sleep(Duration::from_millis(millis));
            }
        }
    }
}

pub struct ProofOfWork {
    block: Block,
    target: Target,
    difficulty: u32,
    delay: MiningDelay,
}

impl ProofOfWork {
    pub fn new(block: Block, difficulty: u32) -> ProofOfWork {
        ProofOfWork {
            block,
            target: Target::from_difficulty(difficulty),
            difficulty,
            delay: MiningDelay::None,
        }
    }

    pub fn with_delay(mut self, delay: MiningDelay) -> ProofOfWork {
        self.delay = delay;
        self
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Search nonces from zero until the digest meets the target. Unbounded
    /// and deterministic for a given block content. Returns the nonce-bearing
    /// block together with the first satisfying digest; sealing is left to
    /// the caller, after independent re-verification.
    pub fn run(self) -> Result<(Block, String)> {
        let ProofOfWork {
            mut block,
            target,
            difficulty: _,
            delay,
        } = self;

        block = block.with_nonce(0);
        loop {
            let data = block.serialize()?;
            let digest = sha256_digest(data.as_slice());
            if target.is_met_by(digest.as_slice()) {
                return Ok((block, HEXLOWER.encode(digest.as_slice())));
            }
            delay.pause();
            let next = block.get_nonce().wrapping_add(1);
            block = block.with_nonce(next);
        }
    }

    /// The single source of truth for "is this hash legitimate for this
    /// block's content": the claimed digest must meet the difficulty target
    /// and must equal an independent recomputation from the block's current
    /// field values. Content that cannot be serialized can never verify.
    pub fn is_valid_proof(block: &Block, claimed_hash: &str, difficulty: u32) -> bool {
        if !Target::from_difficulty(difficulty).is_met_by_hex(claimed_hash) {
            return false;
        }
        match block.compute_hash() {
            Ok(computed) => claimed_hash == computed,
            Err(_) => false,
        }
    }
}
