use anchor_lang::prelude::*;
use common::MerkleProof;

/// Largest batch encoding a buffer may hold. The Executor built from it must
/// still fit the 10 KiB an account can be created with.
pub const MAX_PAYLOAD_BUFFER_SIZE: usize = 8 * 1024;

/// A buffer account that stores a batch and its proof, built up over multiple
/// transactions to bypass Solana's transaction size limits.
///
/// `deploy_buffered` reads the batch from it and `proxy_message_buffered` the
/// proof. The owner closes it once the batch is delivered.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct PayloadBuffer {
    /// The owner who can append to and close this buffer.
    pub owner: Pubkey,

    /// Borsh encoding of the batch, appended chunk by chunk.
    pub data: Vec<u8>,

    /// Proof of the batch hash, siblings appended chunk by chunk.
    pub proof: MerkleProof,
}

impl PayloadBuffer {
    /// Space needed for a buffer of up to `max_data_len` bytes of batch and
    /// `max_proof_len` siblings.
    pub fn space(max_data_len: usize, max_proof_len: usize) -> usize {
        32 + // owner
        4 + max_data_len + // data
        32 + // proof root
        4 + 32 * max_proof_len // proof siblings
    }

    /// Whether the buffer still serializes into `capacity` bytes of account data.
    pub fn fits(&self, capacity: usize) -> bool {
        8 + Self::space(self.data.len(), self.proof.siblings.len()) <= capacity
    }
}
