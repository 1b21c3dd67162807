use crate::digest::{blake2, Digest};

/// Domain-separation prefix for interior nodes. Leaves enter the tree as
/// message ids (already digests) with no extra prefix, so an interior node
/// can never be reinterpreted as a leaf.
pub(crate) const NODE_PREFIX: u8 = 0x01;

#[inline]
pub(crate) fn node_hash(left: &Digest, right: &Digest) -> Digest {
    let mut state = blake2().to_state();
    state.update(&[NODE_PREFIX]);
    state.update(left.as_bytes());
    state.update(right.as_bytes());
    Digest::from(state.finalize())
}
