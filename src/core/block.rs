use crate::core::Transaction;
use crate::error::{LedgerError, Result};
use crate::utils::{deserialize, serialize, sha256_digest};
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};

/// Sentinel previous hash carried by the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

// An unsealed block: everything a block commits to except its own digest.
// There is deliberately no hash field here - the digest is computed over this
// struct and lives on SealedBlock, so it can never leak into its own preimage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Block {
    index: u64,
    transactions: Vec<Transaction>,
    author: String,
    timestamp: i64,
    nonce: u64,            // Proof-of-work search variable
    previous_hash: String, // Hash of the preceding block, "0" for genesis
}

impl Block {
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        author: &str,
        timestamp: i64,
        previous_hash: String,
        nonce: u64,
    ) -> Block {
        Block {
            index,
            transactions,
            author: author.to_string(),
            timestamp,
            nonce,
            previous_hash,
        }
    }

    /// Compute the block's content digest: the canonical serialization of
    /// every field above, hashed with SHA-256 and rendered as lowercase hex.
    /// Pure function of the visible fields - mining and validation both rely
    /// on recomputing it bit-for-bit from the same inputs.
    pub fn compute_hash(&self) -> Result<String> {
        let bytes = serialize(self)?;
        Ok(HEXLOWER.encode(sha256_digest(bytes.as_slice()).as_slice()))
    }

    /// Rebuild this block with a different nonce. The proof-of-work engine
    /// advances the search this way instead of mutating a shared value.
    pub fn with_nonce(mut self, nonce: u64) -> Block {
        self.nonce = nonce;
        self
    }

    /// Seal the block by attaching its digest. Sealing performs no
    /// verification; the validity predicate and the append protocol do.
    pub fn seal(self, hash: String) -> SealedBlock {
        SealedBlock { block: self, hash }
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Block> {
        deserialize::<Block>(bytes)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.transactions.as_slice()
    }

    pub fn get_author(&self) -> &str {
        self.author.as_str()
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }
}

// A sealed block: the unsealed content plus the digest a proof-of-work search
// produced for it. Once sealed, nothing is mutated; tampering with the inner
// content is what the chain validator exists to detect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct SealedBlock {
    block: Block,
    hash: String,
}

impl SealedBlock {
    /// The unsealed view used when the digest must be recomputed
    pub fn get_block(&self) -> &Block {
        &self.block
    }

    pub fn get_hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn get_index(&self) -> u64 {
        self.block.index
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        self.block.get_transactions()
    }

    pub fn get_author(&self) -> &str {
        self.block.get_author()
    }

    pub fn get_timestamp(&self) -> i64 {
        self.block.timestamp
    }

    pub fn get_nonce(&self) -> u64 {
        self.block.nonce
    }

    pub fn get_previous_hash(&self) -> &str {
        self.block.get_previous_hash()
    }

    pub fn deserialize(bytes: &[u8]) -> Result<SealedBlock> {
        deserialize::<SealedBlock>(bytes)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}
