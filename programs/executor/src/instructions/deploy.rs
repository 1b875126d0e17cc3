use anchor_lang::prelude::*;
use common::{Message, EXECUTOR_SEED};
use relay_layer::{constants::RELAY_LAYER_SEED, state::RelayLayer};

use crate::{internal::deploy_internal, state::Executor};

#[derive(Accounts)]
#[instruction(message_hash: [u8; 32], message: Message)]
pub struct Deploy<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(seeds = [RELAY_LAYER_SEED], bump, seeds::program = relay_layer::ID)]
    pub relay_layer: Account<'info, RelayLayer>,

    /// The Executor for `message`.
    /// - Uses PDA with EXECUTOR_SEED, the relay layer and the batch hash
    /// - Sized for the stored batch
    #[account(
        init,
        payer = payer,
        space = 8 + Executor::space(&message),
        seeds = [EXECUTOR_SEED, relay_layer.key().as_ref(), message_hash.as_ref()],
        bump
    )]
    pub executor: Account<'info, Executor>,

    pub system_program: Program<'info, System>,
}

pub fn deploy_handler(
    ctx: Context<Deploy>,
    message_hash: [u8; 32],
    message: Message,
) -> Result<()> {
    deploy_internal(
        &mut ctx.accounts.executor,
        ctx.accounts.relay_layer.key(),
        ctx.bumps.executor,
        message_hash,
        message,
    )
}
