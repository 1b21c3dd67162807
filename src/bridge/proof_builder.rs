use super::{
    header::{ApplicationHeader, ConsensusHeader},
    merkle::{MerkleProof, MerkleTree},
    message::Message,
};
use crate::digest::{Digest, Digestible};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Raw view of one secondary-chain block as fetched from a chain client:
/// the header scalars plus every outgoing message of the block, in emission
/// order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    pub prev_root: Digest,
    pub height: u32,
    pub timestamp: u64,
    pub da_height: u64,
    pub tx_count: u64,
    pub tx_root: Digest,
    pub messages: Vec<Message>,
}

/// The full input tuple of one relay call, ready to serialize for the
/// relaying client.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RelayParams {
    pub message: Message,
    pub application: ApplicationHeader,
    pub consensus: ConsensusHeader,
    pub proof: MerkleProof,
}

impl RelayParams {
    pub fn block_id(&self) -> Digest {
        self.consensus.id()
    }
}

/// Reconstruct the accumulator the verifier expects and extract the
/// inclusion proof for the message at `message_index`. The headers are
/// re-derived from the raw block, never taken from the caller, so the
/// emitted parameters are exactly what [`super::relay::relay`] recomputes.
pub fn build_relay_params(block: &RawBlock, message_index: u64) -> Result<RelayParams> {
    ensure!(
        (message_index as usize) < block.messages.len(),
        "message index {} out of range ({} messages in block)",
        message_index,
        block.messages.len()
    );
    let leaves: Vec<Digest> = block.messages.iter().map(|m| m.to_digest()).collect();
    let tree = MerkleTree::build(&leaves);
    let application = ApplicationHeader {
        da_height: block.da_height,
        tx_count: block.tx_count,
        output_messages_count: leaves.len() as u64,
        tx_root: block.tx_root,
        output_messages_root: tree.root(),
    };
    let consensus = ConsensusHeader {
        prev_root: block.prev_root,
        height: block.height,
        timestamp: block.timestamp,
        application_hash: application.to_digest(),
    };
    let proof = tree.prove(message_index)?;
    debug!(
        "built relay params for message {} of block {} (root {})",
        message_index,
        consensus.id(),
        application.output_messages_root
    );
    Ok(RelayParams {
        message: block.messages[message_index as usize].clone(),
        application,
        consensus,
        proof,
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample_block;
    use super::*;

    #[test]
    fn test_params_match_verifier_expectations() {
        let block = sample_block(3);
        for i in 0..3u64 {
            let params = build_relay_params(&block, i).unwrap();
            assert_eq!(params.message, block.messages[i as usize]);
            assert_eq!(params.application.output_messages_count, 3);
            assert_eq!(
                params.consensus.application_hash,
                params.application.to_digest()
            );
            assert!(params.proof.verify(
                &params.message.to_digest(),
                &params.application.output_messages_root,
                params.application.output_messages_count,
            ));
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let block = sample_block(2);
        assert!(build_relay_params(&block, 2).is_err());
    }
}
