use crate::announce::Announce;
use crate::core::SealedBlock;
use crate::error::Result;
use crate::utils::{deserialize, serialize};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// What a file announce leaves behind: who mined, and what they sealed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct AnnounceRecord {
    miner: String,
    block: SealedBlock,
}

impl AnnounceRecord {
    pub fn new(miner: &str, block: SealedBlock) -> AnnounceRecord {
        AnnounceRecord {
            miner: miner.to_string(),
            block,
        }
    }

    pub fn get_miner(&self) -> &str {
        self.miner.as_str()
    }

    pub fn get_block(&self) -> &SealedBlock {
        &self.block
    }

    pub fn deserialize(bytes: &[u8]) -> Result<AnnounceRecord> {
        deserialize::<AnnounceRecord>(bytes)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }
}

/// Writes each announcement to a local marker file, overwriting the previous
/// one. This stands in for a real broadcast layer: a single-node ledger has
/// no peers, so the file is the whole audience.
pub struct FileAnnounce {
    path: PathBuf,
}

impl FileAnnounce {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileAnnounce {
        FileAnnounce { path: path.into() }
    }

    pub fn get_path(&self) -> &PathBuf {
        &self.path
    }
}

impl Announce for FileAnnounce {
    fn announce(&self, miner: &str, block: &SealedBlock) -> Result<()> {
        let record = AnnounceRecord::new(miner, block.clone());
        let bytes = record.serialize()?;
        fs::write(&self.path, bytes)?;
        info!(
            "Announced block {} by {miner} to {}",
            block.get_index(),
            self.path.display()
        );
        Ok(())
    }
}
