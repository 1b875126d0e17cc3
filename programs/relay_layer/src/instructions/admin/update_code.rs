#![allow(deprecated)]

use anchor_lang::{
    prelude::*,
    solana_program::{bpf_loader_upgradeable, program::invoke_signed},
};

use crate::{constants::RELAY_LAYER_SEED, error::RelayLayerError, state::RelayLayer};

/// Accounts struct for upgrading the relay layer program itself.
/// The `RelayLayer` PDA must be the program's upgrade authority.
#[derive(Accounts)]
pub struct UpdateCode<'info> {
    #[account(
        has_one = admin @ RelayLayerError::NotFromAdmin,
        seeds = [RELAY_LAYER_SEED],
        bump
    )]
    pub relay_layer: Account<'info, RelayLayer>,

    pub admin: Signer<'info>,

    /// CHECK: This program, upgraded in place.
    #[account(mut, address = crate::ID)]
    pub program: UncheckedAccount<'info>,

    /// CHECK: Program data account of this program, checked by the loader.
    #[account(mut)]
    pub program_data: UncheckedAccount<'info>,

    /// CHECK: Buffer holding the new code, checked by the loader.
    #[account(mut)]
    pub buffer: UncheckedAccount<'info>,

    /// CHECK: Receives the buffer's lamports.
    #[account(mut)]
    pub spill: UncheckedAccount<'info>,

    pub rent: Sysvar<'info, Rent>,
    pub clock: Sysvar<'info, Clock>,

    /// CHECK: The upgradeable loader.
    #[account(address = bpf_loader_upgradeable::ID)]
    pub bpf_loader_upgradeable: UncheckedAccount<'info>,
}

pub fn update_code_handler(ctx: Context<UpdateCode>) -> Result<()> {
    let authority = ctx.accounts.relay_layer.key();
    let ix = bpf_loader_upgradeable::upgrade(
        &ctx.accounts.program.key(),
        &ctx.accounts.buffer.key(),
        &authority,
        &ctx.accounts.spill.key(),
    );

    let seeds: &[&[&[u8]]] = &[&[RELAY_LAYER_SEED, &[ctx.bumps.relay_layer]]];
    invoke_signed(
        &ix,
        &[
            ctx.accounts.program_data.to_account_info(),
            ctx.accounts.program.to_account_info(),
            ctx.accounts.buffer.to_account_info(),
            ctx.accounts.spill.to_account_info(),
            ctx.accounts.rent.to_account_info(),
            ctx.accounts.clock.to_account_info(),
            ctx.accounts.relay_layer.to_account_info(),
            ctx.accounts.bpf_loader_upgradeable.to_account_info(),
        ],
        seeds,
    )?;

    Ok(())
}
