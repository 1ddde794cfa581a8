// The ledger owns the canonical chain and the pending pool and is the only
// path through which blocks come into existence: genesis at construction,
// everything after through mine -> re-verify -> append. Mining computing a
// proof never bypasses re-verification at append time; the two stay decoupled
// so an externally supplied block/proof pair faces the same checks.

use crate::announce::{Announce, NullAnnounce};
use crate::core::{
    Block, MiningDelay, ProofOfWork, SealedBlock, Transaction, GENESIS_PREVIOUS_HASH,
};
use crate::error::{LedgerError, Result};
use crate::storage::PendingPool;
use crate::utils::{current_timestamp, deserialize, serialize};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, RwLock};

// Fixed genesis identity: every node at the same difficulty derives the
// identical genesis block
const GENESIS_AUTHOR: &str = "Satoshi";
const GENESIS_TIMESTAMP: i64 = 0;

/// What a call to [`Ledger::mine`] accomplished. An empty pool is a reported
/// no-op, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MineOutcome {
    NothingToMine,
    Mined(SealedBlock),
}

impl MineOutcome {
    pub fn mined_block(&self) -> Option<&SealedBlock> {
        match self {
            MineOutcome::Mined(block) => Some(block),
            MineOutcome::NothingToMine => None,
        }
    }
}

/// Read-only, deep-copied view of the chain. Safe to hand to a validator or
/// an external inspector while mining continues on the live ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct ChainSnapshot {
    length: usize,
    chain: Vec<SealedBlock>,
}

impl ChainSnapshot {
    pub fn get_length(&self) -> usize {
        self.length
    }

    pub fn get_chain(&self) -> &[SealedBlock] {
        self.chain.as_slice()
    }

    pub fn into_chain(self) -> Vec<SealedBlock> {
        self.chain
    }

    pub fn deserialize(bytes: &[u8]) -> Result<ChainSnapshot> {
        deserialize::<ChainSnapshot>(bytes)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}

pub struct Ledger {
    chain: RwLock<Vec<SealedBlock>>,
    pool: PendingPool,
    node_name: String,
    difficulty: u32,
    delay: MiningDelay,
    announcer: Box<dyn Announce>,
    // Single-writer discipline: at most one nonce search in flight per ledger
    mining_guard: Mutex<()>,
}

impl Ledger {
    /// A ledger that announces to no one
    pub fn new(node_name: &str, difficulty: u32) -> Result<Ledger> {
        Self::with_announcer(node_name, difficulty, Box::new(NullAnnounce))
    }

    /// Mines genesis synchronously; no other operation is possible before the
    /// chain has its first block, so construction fails if genesis cannot be
    /// built.
    pub fn with_announcer(
        node_name: &str,
        difficulty: u32,
        announcer: Box<dyn Announce>,
    ) -> Result<Ledger> {
        info!("Creating ledger for {node_name} at difficulty {difficulty}");
        let genesis = Self::create_genesis_block(difficulty)?;
        info!("Genesis block created: {}", genesis.to_json()?);

        Ok(Ledger {
            chain: RwLock::new(vec![genesis]),
            pool: PendingPool::new(),
            node_name: node_name.to_string(),
            difficulty,
            delay: MiningDelay::None,
            announcer,
            mining_guard: Mutex::new(()),
        })
    }

    fn create_genesis_block(difficulty: u32) -> Result<SealedBlock> {
        let block = Block::new(
            0,
            vec![],
            GENESIS_AUTHOR,
            GENESIS_TIMESTAMP,
            GENESIS_PREVIOUS_HASH.to_string(),
            0,
        );
        let (mined, hash) = ProofOfWork::new(block, difficulty).run()?;
        Ok(mined.seal(hash))
    }

    pub fn set_mining_delay(&mut self, delay: MiningDelay) {
        self.delay = delay;
    }

    pub fn get_node_name(&self) -> &str {
        self.node_name.as_str()
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    /// No content validation happens here - the ledger orders and seals
    /// entries, it does not judge them
    pub fn add_transaction(&self, tx: Transaction) {
        info!(
            "Transaction added: {}",
            tx.to_json().unwrap_or_else(|_| "<unserializable>".to_string())
        );
        self.pool.add(tx);
    }

    pub fn pending_count(&self) -> usize {
        self.pool.len()
    }

    pub fn latest_block(&self) -> SealedBlock {
        let chain = self
            .chain
            .read()
            .expect("Failed to acquire read lock on chain - this should never happen");
        chain
            .last()
            .cloned()
            .expect("Chain always holds at least the genesis block")
    }

    /// Drain the pool into a new block and extend the chain with it.
    ///
    /// The pool snapshot is consumed as one atomic unit: after a successful
    /// append, exactly the snapshotted transactions are discarded, so anything
    /// added mid-search waits for the next cycle. On append failure nothing is
    /// discarded - calling `mine()` again rebuilds a fresh block (new
    /// timestamp) from the preserved pool at the same index.
    pub fn mine(&self) -> Result<MineOutcome> {
        let _search = self
            .mining_guard
            .lock()
            .expect("Failed to acquire mining guard - this should never happen");

        let pending = self.pool.snapshot();
        if pending.is_empty() {
            info!("Nothing to mine: pending pool is empty");
            return Ok(MineOutcome::NothingToMine);
        }
        let consumed = pending.len();

        let tip = self.latest_block();
        let block = Block::new(
            tip.get_index() + 1,
            pending,
            self.node_name.as_str(),
            current_timestamp()?,
            tip.get_hash().to_string(),
            0,
        );

        info!(
            "Mining block {} with {consumed} transactions at difficulty {}",
            block.get_index(),
            self.difficulty
        );
        let (mined, proof) = ProofOfWork::new(block, self.difficulty)
            .with_delay(self.delay)
            .run()?;
        info!("Proof found: {proof} at nonce {}", mined.get_nonce());

        let sealed = self.append_block(mined, proof)?;
        self.pool.discard_front(consumed);

        if let Err(e) = self.announcer.announce(self.node_name.as_str(), &sealed) {
            // The block is already on the chain; a deaf collaborator does not
            // roll it back
            warn!("Announce failed for block {}: {e}", sealed.get_index());
        }

        Ok(MineOutcome::Mined(sealed))
    }

    /// Seal and append a candidate block after strict re-verification,
    /// independent of wherever its proof came from. Fails without touching
    /// the chain if the linkage or the proof does not hold.
    pub fn append_block(&self, block: Block, proof: String) -> Result<SealedBlock> {
        let mut chain = self
            .chain
            .write()
            .expect("Failed to acquire write lock on chain - this should never happen");
        let tip_hash = chain
            .last()
            .map(|sealed| sealed.get_hash().to_string())
            .expect("Chain always holds at least the genesis block");

        if block.get_previous_hash() != tip_hash {
            error!(
                "Rejecting block {}: previous hash {} does not match tip {tip_hash}",
                block.get_index(),
                block.get_previous_hash()
            );
            return Err(LedgerError::Integrity {
                expected: tip_hash,
                found: block.get_previous_hash().to_string(),
            });
        }

        if !ProofOfWork::is_valid_proof(&block, proof.as_str(), self.difficulty) {
            error!("Rejecting block {}: invalid proof {proof}", block.get_index());
            return Err(LedgerError::InvalidProof(proof));
        }

        let sealed = block.seal(proof);
        info!("Block appended: {}", sealed.to_json()?);
        chain.push(sealed.clone());
        Ok(sealed)
    }

    pub fn get_chain(&self) -> ChainSnapshot {
        let chain = self
            .chain
            .read()
            .expect("Failed to acquire read lock on chain - this should never happen");
        ChainSnapshot {
            length: chain.len(),
            chain: chain.clone(),
        }
    }
}
