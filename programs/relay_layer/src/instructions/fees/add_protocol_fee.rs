use anchor_lang::prelude::*;

use crate::{
    constants::{RELAY_LAYER_SEED, SOL_VAULT_SEED},
    error::RelayLayerError,
    internal::pay_from_signer,
    state::RelayLayer,
};

#[derive(Accounts)]
pub struct AddProtocolFee<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(mut, seeds = [RELAY_LAYER_SEED], bump)]
    pub relay_layer: Account<'info, RelayLayer>,

    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Tops up the protocol fee supply. The configured fee deposit is kept by the
/// vault and the rest is accrued.
pub fn add_protocol_fee_handler(
    ctx: Context<AddProtocolFee>,
    query_id: u64,
    amount: u64,
) -> Result<()> {
    let fee_deposit = ctx.accounts.relay_layer.processing_costs.fee_deposit;
    require!(amount > fee_deposit, RelayLayerError::NotEnoughSol);

    pay_from_signer(
        &ctx.accounts.system_program.to_account_info(),
        &ctx.accounts.payer.to_account_info(),
        &ctx.accounts.sol_vault.to_account_info(),
        amount,
    )?;

    let added = amount - fee_deposit;
    let fees = &mut ctx.accounts.relay_layer.fees;
    fees.accrue(added)?;

    emit!(ProtocolFeeAdded {
        query_id,
        payer: ctx.accounts.payer.key(),
        amount: added,
        protocol_fee_supply: fees.protocol_fee_supply,
    });

    Ok(())
}

#[event]
pub struct ProtocolFeeAdded {
    pub query_id: u64,
    pub payer: Pubkey,
    pub amount: u64,
    pub protocol_fee_supply: u64,
}
