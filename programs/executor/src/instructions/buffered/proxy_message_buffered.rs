use anchor_lang::prelude::*;

use crate::{instructions::proxy_message::*, internal::proxy_message_internal, state::PayloadBuffer};

/// Same as `proxy_message`, but reads the proof from a payload buffer instead
/// of the instruction data.
#[derive(Accounts)]
pub struct ProxyMessageBuffered<'info> {
    pub proxy: ProxyMessage<'info>,

    /// The buffer holding the proof. It is not consumed, so a rejected batch can
    /// be retried from it.
    pub payload_buffer: Account<'info, PayloadBuffer>,
}

pub fn proxy_message_buffered_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProxyMessageBuffered<'info>>,
    query_id: u64,
    fee_to: Pubkey,
    response_address: Option<Pubkey>,
    msg_value: u64,
) -> Result<()> {
    let proof = ctx.accounts.payload_buffer.proof.clone();

    proxy_message_internal(
        &mut ctx.accounts.proxy,
        ctx.remaining_accounts,
        query_id,
        proof,
        fee_to,
        response_address,
        msg_value,
    )
}
