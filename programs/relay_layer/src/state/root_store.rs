use anchor_lang::prelude::*;

use crate::constants::MAX_ROOTS_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct MerkleRoot {
    pub root: [u8; 32],
    /// Start of the voting window that follows the root's epoch.
    pub valid_timestamp: i64,
}

/// Sequencer-attested roots, oldest first.
///
/// Any stored root is valid for proofs; several roots are live at once so that
/// batches in flight across a rotation can still be relayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct RootStore {
    #[max_len(MAX_ROOTS_CAPACITY)]
    pub roots: Vec<MerkleRoot>,
}

impl RootStore {
    pub fn contains(&self, root: &[u8; 32]) -> bool {
        self.roots.iter().any(|stored| stored.root == *root)
    }

    pub fn latest(&self) -> Option<&MerkleRoot> {
        self.roots.last()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Stores `root` after evicting every root valid until `evict_up_to` or
    /// earlier. If the store would still exceed `capacity`, the oldest roots are
    /// dropped; the inserted root is always kept.
    pub fn insert(&mut self, root: MerkleRoot, evict_up_to: i64, capacity: usize) {
        self.roots
            .retain(|stored| stored.valid_timestamp > evict_up_to);

        let keep = capacity.saturating_sub(1);
        if self.roots.len() > keep {
            let overflow = self.roots.len() - keep;
            self.roots.drain(..overflow);
        }

        self.roots.push(root);
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }
}
