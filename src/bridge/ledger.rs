use super::{
    message::Address,
    traits::{Clock, ReadInterface, WriteInterface},
    BridgeError,
};
use crate::digest::Digest;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One entry of the commit ring. Its content is authoritative for
/// `commit_height` only while unoverwritten, and trusted only after the
/// finalization window has elapsed since `committed_at`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommitSlot {
    pub commit_height: u64,
    pub block_hash: Digest,
    pub committed_at: u64,
}

/// Commit-height bucket of a block height (floor division).
#[inline]
pub fn commit_height_of(block_height: u64, blocks_per_commit_interval: u64) -> u64 {
    block_height / blocks_per_commit_interval
}

/// Record `block_id` in the ring slot for `commit_height`, overwriting any
/// previous occupant and stamping the commit time. Restricted to the
/// configured committer.
///
/// The ring bounds ledger storage to `num_commit_slots` entries regardless
/// of chain length; an old un-relayed commit can be evicted by a later
/// commit landing on the same ring position, after which it can no longer be
/// proven finalized. That staleness tradeoff is part of the design.
pub fn commit<S, C>(
    store: &mut S,
    clock: &C,
    caller: &Address,
    block_id: Digest,
    commit_height: u64,
) -> Result<(), BridgeError>
where
    S: ReadInterface + WriteInterface,
    C: Clock,
{
    let param = store.get_parameter()?;
    param.validate()?;
    if *caller != param.committer {
        warn!("commit attempt by non-committer {}", caller);
        return Err(BridgeError::Unauthorized);
    }
    let slot_index = commit_height % param.num_commit_slots;
    let slot = CommitSlot {
        commit_height,
        block_hash: block_id,
        committed_at: clock.now(),
    };
    store.write_commit_slot(slot_index, &slot)?;
    info!(
        "committed block {} at commit height {} (slot {})",
        block_id, commit_height, slot_index
    );
    Ok(())
}

/// Whether `block_id` at `block_height` may be trusted for relay.
///
/// True iff the ring slot for the block's commit-height bucket still holds
/// this exact commit and the finalization window has elapsed. Every mismatch
/// (empty slot, overwritten slot, wrong hash, window not yet elapsed) is a
/// plain `false`; only storage faults and invalid parameters are errors.
pub fn is_finalized<S, C>(store: &S, clock: &C, block_id: &Digest, block_height: u64) -> Result<bool>
where
    S: ReadInterface,
    C: Clock,
{
    let param = store.get_parameter()?;
    param.validate()?;
    let commit_height = commit_height_of(block_height, param.blocks_per_commit_interval);
    let slot_index = commit_height % param.num_commit_slots;
    let slot = match store.read_commit_slot(slot_index)? {
        Some(slot) => slot,
        None => return Ok(false),
    };
    if slot.commit_height != commit_height || slot.block_hash != *block_id {
        return Ok(false);
    }
    Ok(clock.now().saturating_sub(slot.committed_at) >= param.time_to_finalize)
}
