use anchor_lang::prelude::*;

use crate::{instructions::PayloadBufferError, state::PayloadBuffer};

#[derive(Accounts)]
pub struct ClosePayloadBuffer<'info> {
    /// The owner of the buffer who receives the rent refund.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        close = owner,
        has_one = owner @ PayloadBufferError::Unauthorized,
    )]
    pub payload_buffer: Account<'info, PayloadBuffer>,
}

pub fn close_payload_buffer_handler(_ctx: Context<ClosePayloadBuffer>) -> Result<()> {
    Ok(())
}
