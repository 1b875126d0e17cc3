use anchor_lang::prelude::*;
use common::{Message, EXECUTOR_SEED};
use relay_layer::{constants::RELAY_LAYER_SEED, state::RelayLayer};

use crate::{
    instructions::PayloadBufferError,
    internal::deploy_internal,
    state::{Executor, PayloadBuffer},
};

/// Same as `deploy`, but reads the batch from a payload buffer instead of the
/// instruction data.
#[derive(Accounts)]
#[instruction(message_hash: [u8; 32])]
pub struct DeployBuffered<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(seeds = [RELAY_LAYER_SEED], bump, seeds::program = relay_layer::ID)]
    pub relay_layer: Account<'info, RelayLayer>,

    /// The buffer holding the batch. Anyone may deploy from it since the batch
    /// must hash to `message_hash`.
    pub payload_buffer: Account<'info, PayloadBuffer>,

    #[account(
        init,
        payer = payer,
        space = 8 + Executor::space_for_payload_len(payload_buffer.data.len()),
        seeds = [EXECUTOR_SEED, relay_layer.key().as_ref(), message_hash.as_ref()],
        bump
    )]
    pub executor: Account<'info, Executor>,

    pub system_program: Program<'info, System>,
}

pub fn deploy_buffered_handler(
    ctx: Context<DeployBuffered>,
    message_hash: [u8; 32],
) -> Result<()> {
    let message = Message::try_from_slice(&ctx.accounts.payload_buffer.data)
        .map_err(|_| PayloadBufferError::InvalidPayload)?;

    deploy_internal(
        &mut ctx.accounts.executor,
        ctx.accounts.relay_layer.key(),
        ctx.bumps.executor,
        message_hash,
        message,
    )
}
