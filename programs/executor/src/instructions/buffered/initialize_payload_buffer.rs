use anchor_lang::prelude::*;
use common::{MerkleProof, MAX_PROOF_DEPTH};

use crate::state::{PayloadBuffer, MAX_PAYLOAD_BUFFER_SIZE};

/// Accounts struct for creating a buffer that a batch too large for a single
/// transaction is written into.
#[derive(Accounts)]
#[instruction(_root: [u8; 32], max_data_len: u32, max_proof_len: u8)]
pub struct InitializePayloadBuffer<'info> {
    /// Pays for the buffer and becomes its owner.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The buffer being created, at a fresh keypair address.
    #[account(
        init,
        payer = payer,
        space = 8 + PayloadBuffer::space(max_data_len as usize, max_proof_len as usize),
    )]
    pub payload_buffer: Account<'info, PayloadBuffer>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_payload_buffer_handler(
    ctx: Context<InitializePayloadBuffer>,
    root: [u8; 32],
    max_data_len: u32,
    max_proof_len: u8,
) -> Result<()> {
    require!(
        max_data_len as usize <= MAX_PAYLOAD_BUFFER_SIZE,
        PayloadBufferError::MaxSizeExceeded
    );
    require!(
        max_proof_len as usize <= MAX_PROOF_DEPTH,
        PayloadBufferError::MaxSizeExceeded
    );

    *ctx.accounts.payload_buffer = PayloadBuffer {
        owner: ctx.accounts.payer.key(),
        data: Vec::new(),
        proof: MerkleProof {
            root,
            siblings: Vec::new(),
        },
    };

    Ok(())
}

#[error_code]
pub enum PayloadBufferError {
    #[msg("Payload buffer exceeds the maximum allowed size")]
    MaxSizeExceeded,
    #[msg("Payload buffer has no room left")]
    BufferFull,
    #[msg("Only the owner can modify this payload buffer")]
    Unauthorized,
    #[msg("Payload buffer does not hold a valid batch")]
    InvalidPayload,
}
