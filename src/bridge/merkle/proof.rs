use super::hash::node_hash;
use crate::digest::Digest;
use serde::{Deserialize, Serialize};

/// Proofs deeper than this cannot come from a real tree (the key is a u64).
pub const MAX_PROOF_LEN: usize = 64;

/// Inclusion proof: the leaf's insertion index and the sibling digests from
/// the leaf up to the root, skipping levels where the path node was promoted.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub key: u64,
    pub path: Vec<Digest>,
}

impl MerkleProof {
    pub fn new(key: u64, path: Vec<Digest>) -> Self {
        Self { key, path }
    }

    /// Re-derive the root from `leaf` and compare against `expected_root`.
    ///
    /// `num_leaves` is the total leaf count of the tree (bound into the
    /// block header as `output_messages_count`); it decides which fold
    /// levels sit inside a complete subtree and which were promoted. Fails
    /// closed: any length mismatch, out-of-range key, or digest mismatch
    /// returns `false`, and no input panics.
    pub fn verify(&self, leaf: &Digest, expected_root: &Digest, num_leaves: u64) -> bool {
        if num_leaves == 0 || self.key >= num_leaves || self.path.len() > MAX_PROOF_LEN {
            return false;
        }
        if num_leaves == 1 {
            return self.path.is_empty() && leaf == expected_root;
        }
        if self.path.is_empty() {
            return false;
        }

        let key = u128::from(self.key);
        let leaves = u128::from(num_leaves);
        let mut digest = *leaf;
        let mut height = 1u32;
        let mut stable_end = key;

        // Fold while the key sits in a complete subtree; the key's offset in
        // the subtree picks the operand side.
        loop {
            let subtree_size = 1u128 << height;
            let subtree_start = key / subtree_size * subtree_size;
            let subtree_end = subtree_start + subtree_size - 1;
            if subtree_end >= leaves {
                break;
            }
            stable_end = subtree_end;
            let sibling = match self.path.get((height - 1) as usize) {
                Some(s) => s,
                None => return false,
            };
            if key - subtree_start < subtree_size / 2 {
                digest = node_hash(&digest, sibling);
            } else {
                digest = node_hash(sibling, &digest);
            }
            height += 1;
        }

        // Leaves beyond the stable region hang off the right flank; join
        // them once as the right operand.
        if leaves > stable_end + 1 {
            let sibling = match self.path.get((height - 1) as usize) {
                Some(s) => s,
                None => return false,
            };
            digest = node_hash(&digest, sibling);
            height += 1;
        }

        // Any remaining elements are roots of larger left subtrees the
        // promoted path node was eventually paired under.
        while ((height - 1) as usize) < self.path.len() {
            let sibling = &self.path[(height - 1) as usize];
            digest = node_hash(sibling, &digest);
            height += 1;
        }

        digest == *expected_root
    }
}
