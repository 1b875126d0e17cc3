use anchor_lang::prelude::*;

use crate::{
    constants::{RELAY_LAYER_SEED, SOL_VAULT_SEED},
    error::RelayLayerError,
    internal::pay_from_vault,
    state::RelayLayer,
};

#[derive(Accounts)]
pub struct CollectProtocolFee<'info> {
    #[account(
        mut,
        has_one = attester @ RelayLayerError::NotFromAttester,
        seeds = [RELAY_LAYER_SEED],
        bump
    )]
    pub relay_layer: Account<'info, RelayLayer>,

    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    #[account(mut)]
    pub attester: Signer<'info>,

    pub system_program: Program<'info, System>,
}

/// Pays the whole protocol fee supply out to the attester.
pub fn collect_protocol_fee_handler(ctx: Context<CollectProtocolFee>, query_id: u64) -> Result<()> {
    let amount = ctx.accounts.relay_layer.fees.collect()?;

    pay_from_vault(
        &ctx.accounts.system_program.to_account_info(),
        &ctx.accounts.sol_vault.to_account_info(),
        ctx.bumps.sol_vault,
        &ctx.accounts.attester.to_account_info(),
        amount,
    )?;

    emit!(ProtocolFeeCollected {
        query_id,
        attester: ctx.accounts.attester.key(),
        amount,
    });

    Ok(())
}

#[event]
pub struct ProtocolFeeCollected {
    pub query_id: u64,
    pub attester: Pubkey,
    pub amount: u64,
}
