use super::{ledger::CommitSlot, Parameter};
use anyhow::Result;
use ethereum_types::U256;
use std::time::{SystemTime, UNIX_EPOCH};

pub trait ReadInterface {
    fn get_parameter(&self) -> Result<Parameter>;
    /// Content of a ring slot; `None` while the slot has never been written.
    fn read_commit_slot(&self, slot_index: u64) -> Result<Option<CommitSlot>>;
    fn nonce_spent(&self, nonce: &U256) -> Result<bool>;
}

pub trait WriteInterface {
    fn set_parameter(&mut self, param: &Parameter) -> Result<()>;
    fn write_commit_slot(&mut self, slot_index: u64, slot: &CommitSlot) -> Result<()>;
    /// The spent-nonce set is append-only; marking a nonce twice is a no-op.
    fn mark_nonce_spent(&mut self, nonce: &U256) -> Result<()>;
}

/// Time source for commit stamps and the finalization-window check. Injected
/// so the window boundary is testable without wall-clock sleeps.
pub trait Clock {
    fn now(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}
