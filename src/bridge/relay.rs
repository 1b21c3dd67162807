use super::{
    header::{ApplicationHeader, ConsensusHeader},
    ledger::is_finalized,
    merkle::{MerkleProof, MAX_PROOF_LEN},
    message::Message,
    traits::{Clock, ReadInterface, WriteInterface},
    BridgeError,
};
use crate::digest::{Digest, Digestible};
use serde::{Deserialize, Serialize};

/// A successfully verified message, released for downstream payout.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RelayedMessage {
    pub message_id: Digest,
    pub message: Message,
}

/// Verify a message relay against a finalized header and consume its nonce.
///
/// The checks run in a fixed order: header integrity, finalization,
/// inclusion, replay. Each failure is terminal for this call; the caller may
/// retry a `NotFinalized` outcome later, while `InvalidProof` and
/// `AlreadyRelayed` are permanent for this input. The nonce check and mark
/// are atomic under the exclusive store borrow, which is the crate's
/// serialized-ledger execution model.
pub fn relay<S, C>(
    store: &mut S,
    clock: &C,
    message: &Message,
    application: &ApplicationHeader,
    consensus: &ConsensusHeader,
    proof: &MerkleProof,
) -> Result<RelayedMessage, BridgeError>
where
    S: ReadInterface + WriteInterface,
    C: Clock,
{
    // An embedded application hash is never trusted; it must re-derive from
    // the supplied application fields.
    if application.to_digest() != consensus.application_hash {
        return Err(BridgeError::MalformedInput(
            "application hash does not match the application header",
        ));
    }
    if application.output_messages_count == 0 {
        return Err(BridgeError::MalformedInput(
            "header commits to no outgoing messages",
        ));
    }
    if proof.key >= application.output_messages_count {
        return Err(BridgeError::MalformedInput(
            "proof key out of range of the message count",
        ));
    }
    if proof.path.len() > MAX_PROOF_LEN {
        return Err(BridgeError::MalformedInput("proof path too long"));
    }

    let block_id = consensus.id();
    if !is_finalized(store, clock, &block_id, u64::from(consensus.height))? {
        return Err(BridgeError::NotFinalized);
    }

    let message_id = message.to_digest();
    if !proof.verify(
        &message_id,
        &application.output_messages_root,
        application.output_messages_count,
    ) {
        return Err(BridgeError::InvalidProof);
    }

    if store.nonce_spent(&message.nonce)? {
        return Err(BridgeError::AlreadyRelayed);
    }
    store.mark_nonce_spent(&message.nonce)?;
    info!(
        "relayed message {} (nonce {}) from block {}",
        message_id, message.nonce, block_id
    );

    Ok(RelayedMessage {
        message_id,
        message: message.clone(),
    })
}
