use crate::digest::Digest;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod hash;
pub use hash::*;
pub mod proof;
pub use proof::*;


#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
pub struct MerkleNodeId(pub u64);

/// A node in the flat node table. Leaves have no children; a node promoted
/// past a level keeps `parent` unset until it is actually paired.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MerkleNode {
    pub digest: Digest,
    pub left: Option<MerkleNodeId>,
    pub right: Option<MerkleNodeId>,
    pub parent: Option<MerkleNodeId>,
}

impl MerkleNode {
    fn from_leaf(digest: Digest) -> Self {
        Self {
            digest,
            left: None,
            right: None,
            parent: None,
        }
    }
}

/// Binary Merkle accumulator over an ordered sequence of leaf digests.
///
/// The tree is built bottom-up, pairing adjacent nodes left-to-right. When a
/// level has an odd node count the trailing node is promoted unchanged to
/// the next level; it is never self-paired or duplicated. The node table is
/// a flat arena owned by the tree, with leaves at ids `0..leaf_count`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MerkleTree {
    nodes: Vec<MerkleNode>,
    root: Option<MerkleNodeId>,
    leaf_count: u64,
}

impl MerkleTree {
    pub fn build(leaves: &[Digest]) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(leaves.len().saturating_mul(2)),
            root: None,
            leaf_count: leaves.len() as u64,
        };
        if leaves.is_empty() {
            return tree;
        }
        let mut level: Vec<MerkleNodeId> = leaves
            .iter()
            .map(|digest| tree.alloc(MerkleNode::from_leaf(*digest)))
            .collect();
        while level.len() > 1 {
            let mut next = Vec::with_capacity((level.len() + 1) / 2);
            for pair in level.chunks(2) {
                match *pair {
                    [left, right] => next.push(tree.join(left, right)),
                    [promoted] => next.push(promoted),
                    _ => unreachable!(),
                }
            }
            level = next;
        }
        tree.root = level.first().copied();
        tree
    }

    /// Root of the accumulator; the empty tree has the zero digest by
    /// convention, a single-leaf tree has the leaf digest itself.
    pub fn root(&self) -> Digest {
        match self.root {
            Some(id) => self.nodes[id.0 as usize].digest,
            None => Digest::zero(),
        }
    }

    pub fn leaf_count(&self) -> u64 {
        self.leaf_count
    }

    pub fn node(&self, id: MerkleNodeId) -> Result<&MerkleNode> {
        self.nodes
            .get(id.0 as usize)
            .with_context(|| format!("node {} not in the node table", id))
    }

    /// Inclusion proof for the leaf at `leaf_index`: the sibling digests on
    /// the walk from the leaf to the root. Levels where the walk passes a
    /// promoted node contribute no element.
    pub fn prove(&self, leaf_index: u64) -> Result<MerkleProof> {
        anyhow::ensure!(
            leaf_index < self.leaf_count,
            "leaf index {} out of range (leaf count {})",
            leaf_index,
            self.leaf_count
        );
        let mut path = Vec::new();
        let mut cur = MerkleNodeId(leaf_index);
        while let Some(parent_id) = self.node(cur)?.parent {
            let parent = self.node(parent_id)?;
            let sibling_id = if parent.left == Some(cur) {
                parent.right
            } else {
                parent.left
            };
            let sibling_id = sibling_id.context("interior node with a single child")?;
            path.push(self.node(sibling_id)?.digest);
            cur = parent_id;
        }
        Ok(MerkleProof {
            key: leaf_index,
            path,
        })
    }

    fn alloc(&mut self, node: MerkleNode) -> MerkleNodeId {
        let id = MerkleNodeId(self.nodes.len() as u64);
        self.nodes.push(node);
        id
    }

    fn join(&mut self, left: MerkleNodeId, right: MerkleNodeId) -> MerkleNodeId {
        let digest = node_hash(
            &self.nodes[left.0 as usize].digest,
            &self.nodes[right.0 as usize].digest,
        );
        let parent = self.alloc(MerkleNode {
            digest,
            left: Some(left),
            right: Some(right),
            parent: None,
        });
        self.nodes[left.0 as usize].parent = Some(parent);
        self.nodes[right.0 as usize].parent = Some(parent);
        parent
    }
}
