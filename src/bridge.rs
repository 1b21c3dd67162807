pub mod hash;
pub mod header;
pub mod ledger;
pub mod merkle;
pub mod message;
pub mod proof_builder;
pub mod relay;
pub mod traits;


use crate::bridge::message::Address;
use serde::{Deserialize, Serialize};

/// Default commit interval of the original deployment, in blocks.
pub const DEFAULT_BLOCKS_PER_COMMIT_INTERVAL: u64 = 10_800;
/// Default finalization window, in seconds.
pub const DEFAULT_TIME_TO_FINALIZE: u64 = 10_800;
/// Default size of the commit-slot ring.
pub const DEFAULT_NUM_COMMIT_SLOTS: u64 = 240;

/// Bridge configuration. The committing side and the verifying side must
/// share the exact same values, otherwise commits land in (or are looked up
/// from) the wrong ring slot.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub blocks_per_commit_interval: u64,
    pub time_to_finalize: u64,
    pub num_commit_slots: u64,
    pub committer: Address,
}

impl Parameter {
    pub fn new(
        blocks_per_commit_interval: u64,
        time_to_finalize: u64,
        num_commit_slots: u64,
        committer: Address,
    ) -> Self {
        Self {
            blocks_per_commit_interval,
            time_to_finalize,
            num_commit_slots,
            committer,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.blocks_per_commit_interval > 0,
            "blocks_per_commit_interval must be positive"
        );
        anyhow::ensure!(self.num_commit_slots > 0, "num_commit_slots must be positive");
        Ok(())
    }
}

/// Failure taxonomy of the commit/relay operations.
///
/// `MalformedInput` and `Unauthorized` are caller errors; `NotFinalized` may
/// succeed on a later retry once the window elapses; `InvalidProof` and
/// `AlreadyRelayed` are permanent for the given input.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    #[error("block header is not finalized")]
    NotFinalized,
    #[error("invalid message inclusion proof")]
    InvalidProof,
    #[error("message nonce has already been relayed")]
    AlreadyRelayed,
    #[error("caller is not the designated committer")]
    Unauthorized,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
