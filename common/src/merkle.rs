use anchor_lang::{prelude::*, solana_program::keccak};

pub const MAX_PROOF_DEPTH: usize = 32;

/// Inclusion proof of a message hash under a sequencer-attested root.
#[derive(Debug, Clone, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct MerkleProof {
    pub root: [u8; 32],
    pub siblings: Vec<[u8; 32]>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MalformedProof {
    /// The proof does not commit to any root.
    MissingRoot,
    /// More siblings than any tree the attester can build.
    TooDeep,
}

impl MerkleProof {
    pub fn check_well_formed(&self) -> std::result::Result<(), MalformedProof> {
        if self.root == [0u8; 32] {
            return Err(MalformedProof::MissingRoot);
        }
        if self.siblings.len() > MAX_PROOF_DEPTH {
            return Err(MalformedProof::TooDeep);
        }
        Ok(())
    }

    pub fn compute_root(&self, leaf: &[u8; 32]) -> [u8; 32] {
        self.siblings
            .iter()
            .fold(*leaf, |node, sibling| commutative_keccak256(node, *sibling))
    }

    /// Whether `leaf` is part of the tree committed to by `self.root`.
    pub fn verify(&self, leaf: &[u8; 32]) -> bool {
        self.check_well_formed().is_ok() && self.compute_root(leaf) == self.root
    }
}

/// Sorted-pair keccak tree over message hashes, as built off-ledger by the attester.
///
/// Nodes are hashed with [`commutative_keccak256`], so proofs carry no path
/// bits. A node left without a sibling is promoted to the next level unchanged.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    levels: Vec<Vec<[u8; 32]>>,
}

impl MerkleTree {
    pub fn new(leaves: Vec<[u8; 32]>) -> Self {
        let mut levels = vec![leaves];

        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next = level
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => commutative_keccak256(*a, *b),
                    _ => pair[0],
                })
                .collect::<Vec<_>>();
            levels.push(next);
        }

        Self { levels }
    }

    /// Root of the tree, `None` when built without leaves.
    pub fn root(&self) -> Option<[u8; 32]> {
        self.levels.last().and_then(|level| level.first().copied())
    }

    pub fn proof(&self, index: usize) -> Option<MerkleProof> {
        let root = self.root()?;
        if index >= self.levels[0].len() {
            return None;
        }

        let mut siblings = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            if let Some(sibling) = level.get(position ^ 1) {
                siblings.push(*sibling);
            }
            position /= 2;
        }

        Some(MerkleProof { root, siblings })
    }
}

// Equivalent to `standardNodeHash` of OpenZeppelin's merkle-tree library.
pub fn commutative_keccak256(a: [u8; 32], b: [u8; 32]) -> [u8; 32] {
    if a < b {
        keccak::hashv(&[a.as_ref(), b.as_ref()]).to_bytes()
    } else {
        keccak::hashv(&[b.as_ref(), a.as_ref()]).to_bytes()
    }
}
