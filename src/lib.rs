#![cfg_attr(not(test), warn(clippy::unwrap_used))]

#[macro_use]
extern crate tracing;

pub mod bridge;
pub mod digest;
pub mod utils;

use anyhow::{Context, Result};
use bridge::{
    ledger::CommitSlot,
    traits::{ReadInterface, WriteInterface},
    Parameter,
};
use ethereum_types::U256;
use rocksdb::{self, DB};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn nonce_key(nonce: &U256) -> [u8; 32] {
    let mut key = [0u8; 32];
    nonce.to_big_endian(&mut key);
    key
}

/// Disk-backed bridge store: the commit-slot ring and the spent-nonce set,
/// plus the shared parameters as a `param.json` sidecar.
pub struct SimStore {
    root_path: PathBuf,
    param: Parameter,
    commit_db: DB,
    nonce_db: DB,
}

impl SimStore {
    pub fn create(path: &Path, param: Parameter) -> Result<Self> {
        param.validate()?;
        fs::create_dir_all(path).with_context(|| format!("failed to create dir {:?}", path))?;
        fs::write(
            path.join("param.json"),
            serde_json::to_string_pretty(&param)?,
        )?;
        let mut opts = rocksdb::Options::default();
        opts.create_if_missing(true);
        Ok(Self {
            root_path: path.to_owned(),
            param,
            commit_db: DB::open(&opts, path.join("commit.db"))?,
            nonce_db: DB::open(&opts, path.join("nonce.db"))?,
        })
    }

    pub fn open(path: &Path) -> Result<Self> {
        let param = serde_json::from_str::<Parameter>(
            &fs::read_to_string(path.join("param.json"))
                .with_context(|| format!("failed to read parameter from {:?}", path))?,
        )?;
        Ok(Self {
            root_path: path.to_owned(),
            param,
            commit_db: DB::open_default(path.join("commit.db"))?,
            nonce_db: DB::open_default(path.join("nonce.db"))?,
        })
    }
}

impl ReadInterface for SimStore {
    fn get_parameter(&self) -> Result<Parameter> {
        Ok(self.param.clone())
    }
    fn read_commit_slot(&self, slot_index: u64) -> Result<Option<CommitSlot>> {
        match self.commit_db.get(slot_index.to_le_bytes())? {
            Some(data) => Ok(Some(bincode::deserialize::<CommitSlot>(&data[..])?)),
            None => Ok(None),
        }
    }
    fn nonce_spent(&self, nonce: &U256) -> Result<bool> {
        Ok(self.nonce_db.get(nonce_key(nonce))?.is_some())
    }
}

impl WriteInterface for SimStore {
    fn set_parameter(&mut self, param: &Parameter) -> Result<()> {
        param.validate()?;
        self.param = param.clone();
        let data = serde_json::to_string_pretty(&self.param)?;
        fs::write(self.root_path.join("param.json"), data)?;
        Ok(())
    }
    fn write_commit_slot(&mut self, slot_index: u64, slot: &CommitSlot) -> Result<()> {
        let bytes = bincode::serialize(slot)?;
        self.commit_db.put(slot_index.to_le_bytes(), bytes)?;
        Ok(())
    }
    fn mark_nonce_spent(&mut self, nonce: &U256) -> Result<()> {
        self.nonce_db.put(nonce_key(nonce), [1u8])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::tests::{test_parameter, COMMITTER},
        digest::Digestible,
    };

    #[test]
    fn test_sim_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");

        let slot = CommitSlot {
            commit_height: 7,
            block_hash: "block".to_digest(),
            committed_at: 1_234,
        };
        {
            let mut store = SimStore::create(&path, test_parameter()).unwrap();
            store.write_commit_slot(7 % 240, &slot).unwrap();
            store.mark_nonce_spent(&U256::from(99u64)).unwrap();
        }

        let store = SimStore::open(&path).unwrap();
        assert_eq!(store.get_parameter().unwrap().committer, COMMITTER);
        assert_eq!(store.read_commit_slot(7).unwrap(), Some(slot));
        assert_eq!(store.read_commit_slot(8).unwrap(), None);
        assert!(store.nonce_spent(&U256::from(99u64)).unwrap());
        assert!(!store.nonce_spent(&U256::from(100u64)).unwrap());
    }
}
