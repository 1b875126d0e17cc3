use anchor_lang::prelude::*;
use common::MAX_PROOF_DEPTH;

use crate::{
    instructions::{ExecutorError, PayloadBufferError},
    state::PayloadBuffer,
};

#[derive(Accounts)]
pub struct AppendToPayloadBuffer<'info> {
    pub owner: Signer<'info>,

    #[account(mut, has_one = owner @ PayloadBufferError::Unauthorized)]
    pub payload_buffer: Account<'info, PayloadBuffer>,
}

pub fn append_to_payload_buffer_data_handler(
    ctx: Context<AppendToPayloadBuffer>,
    data: Vec<u8>,
) -> Result<()> {
    let capacity = ctx.accounts.payload_buffer.to_account_info().data_len();
    let payload_buffer = &mut ctx.accounts.payload_buffer;

    payload_buffer.data.extend_from_slice(&data);
    require!(
        payload_buffer.fits(capacity),
        PayloadBufferError::BufferFull
    );

    Ok(())
}

pub fn append_to_payload_buffer_proof_handler(
    ctx: Context<AppendToPayloadBuffer>,
    siblings: Vec<[u8; 32]>,
) -> Result<()> {
    let capacity = ctx.accounts.payload_buffer.to_account_info().data_len();
    let payload_buffer = &mut ctx.accounts.payload_buffer;

    payload_buffer.proof.siblings.extend_from_slice(&siblings);
    require!(
        payload_buffer.proof.siblings.len() <= MAX_PROOF_DEPTH,
        ExecutorError::ProofTooDeep
    );
    require!(
        payload_buffer.fits(capacity),
        PayloadBufferError::BufferFull
    );

    Ok(())
}
