use crate::digest::{Digest, Digestible, DIGEST_LEN};
use serde::{Deserialize, Serialize};

pub const APPLICATION_HEADER_LEN: usize = 8 + 8 + 8 + DIGEST_LEN + DIGEST_LEN;
pub const CONSENSUS_HEADER_LEN: usize = DIGEST_LEN + 4 + 8 + DIGEST_LEN;

/// Application-level part of a secondary-chain block header.
///
/// `output_messages_root` is the accumulator root over the block's outgoing
/// messages and `output_messages_count` the number of leaves under it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplicationHeader {
    pub da_height: u64,
    pub tx_count: u64,
    pub output_messages_count: u64,
    pub tx_root: Digest,
    pub output_messages_root: Digest,
}

impl ApplicationHeader {
    /// Packed big-endian serialization; all fields are fixed-width, so no
    /// length prefixes are needed.
    pub fn to_bytes(&self) -> [u8; APPLICATION_HEADER_LEN] {
        let mut buf = [0u8; APPLICATION_HEADER_LEN];
        buf[0..8].copy_from_slice(&self.da_height.to_be_bytes());
        buf[8..16].copy_from_slice(&self.tx_count.to_be_bytes());
        buf[16..24].copy_from_slice(&self.output_messages_count.to_be_bytes());
        buf[24..56].copy_from_slice(self.tx_root.as_bytes());
        buf[56..88].copy_from_slice(self.output_messages_root.as_bytes());
        buf
    }
}

impl Digestible for ApplicationHeader {
    fn to_digest(&self) -> Digest {
        self.to_bytes()[..].to_digest()
    }
}

/// Consensus-level part of a secondary-chain block header. `application_hash`
/// commits to the [`ApplicationHeader`]; hashing the serialized consensus
/// header yields the block id. The embedded hash is never to be trusted on
/// its own: a consumer holding the application fields must recompute it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsensusHeader {
    pub prev_root: Digest,
    pub height: u32,
    pub timestamp: u64,
    pub application_hash: Digest,
}

impl ConsensusHeader {
    // height keeps the 4-byte on-chain ABI width
    pub fn to_bytes(&self) -> [u8; CONSENSUS_HEADER_LEN] {
        let mut buf = [0u8; CONSENSUS_HEADER_LEN];
        buf[0..32].copy_from_slice(self.prev_root.as_bytes());
        buf[32..36].copy_from_slice(&self.height.to_be_bytes());
        buf[36..44].copy_from_slice(&self.timestamp.to_be_bytes());
        buf[44..76].copy_from_slice(self.application_hash.as_bytes());
        buf
    }

    /// The block id.
    pub fn id(&self) -> Digest {
        self.to_bytes()[..].to_digest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::Digestible;

    fn sample_application() -> ApplicationHeader {
        ApplicationHeader {
            da_height: 11,
            tx_count: 3,
            output_messages_count: 2,
            tx_root: "tx-root".to_digest(),
            output_messages_root: "msg-root".to_digest(),
        }
    }

    fn sample_consensus(application_hash: Digest) -> ConsensusHeader {
        ConsensusHeader {
            prev_root: "prev".to_digest(),
            height: 42,
            timestamp: 1_600_000_000,
            application_hash,
        }
    }

    #[test]
    fn test_application_header_layout() {
        let header = sample_application();
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), APPLICATION_HEADER_LEN);
        assert_eq!(&bytes[0..8], &11u64.to_be_bytes());
        assert_eq!(&bytes[8..16], &3u64.to_be_bytes());
        assert_eq!(&bytes[16..24], &2u64.to_be_bytes());
        assert_eq!(&bytes[24..56], header.tx_root.as_bytes());
        assert_eq!(&bytes[56..88], header.output_messages_root.as_bytes());
    }

    #[test]
    fn test_consensus_header_layout() {
        let app_hash = sample_application().to_digest();
        let header = sample_consensus(app_hash);
        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), CONSENSUS_HEADER_LEN);
        assert_eq!(&bytes[0..32], header.prev_root.as_bytes());
        assert_eq!(&bytes[32..36], &42u32.to_be_bytes());
        assert_eq!(&bytes[36..44], &1_600_000_000u64.to_be_bytes());
        assert_eq!(&bytes[44..76], app_hash.as_bytes());
    }

    #[test]
    fn test_block_id_deterministic() {
        let app = sample_application();
        let header = sample_consensus(app.to_digest());
        assert_eq!(header.id(), sample_consensus(app.to_digest()).id());
    }

    #[test]
    fn test_block_id_field_sensitivity() {
        let app = sample_application();
        let header = sample_consensus(app.to_digest());
        let id = header.id();

        let mut other = header;
        other.height += 1;
        assert_ne!(other.id(), id);

        let mut other = header;
        other.timestamp += 1;
        assert_ne!(other.id(), id);

        let mut other = header;
        other.prev_root = "other-prev".to_digest();
        assert_ne!(other.id(), id);

        // any application field change flows through application_hash
        let mut app2 = app;
        app2.output_messages_count += 1;
        let mut other = header;
        other.application_hash = app2.to_digest();
        assert_ne!(other.id(), id);
    }

    #[test]
    fn test_two_stage_hashes_differ() {
        let app = sample_application();
        let header = sample_consensus(app.to_digest());
        assert_ne!(app.to_digest(), header.id());
    }
}
