use anchor_lang::prelude::*;

use crate::{
    constants::{RELAY_LAYER_SEED, SOL_VAULT_SEED},
    internal::pay_from_signer,
    state::{EpochState, FeeLedger, ProcessingCosts, RelayLayer, RootStore},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The account that pays for the relay layer account and the vault's rent.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The relay layer state account being initialized.
    /// - Uses PDA with RELAY_LAYER_SEED for deterministic address
    /// - Space allocated for the maximum root store size
    #[account(
        init,
        payer = payer,
        seeds = [RELAY_LAYER_SEED],
        bump,
        space = 8 + RelayLayer::INIT_SPACE
    )]
    pub relay_layer: Account<'info, RelayLayer>,

    /// The vault holding locked SOL and the protocol fee supply.
    /// Funded up to the rent-exempt minimum so that small deposits never fail.
    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    /// The account that will have administrative authority over the relay layer.
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn initialize_handler(
    ctx: Context<Initialize>,
    attester: Pubkey,
    executor_program: Pubkey,
    epoch_delay: i64,
    max_roots_size: u8,
    tac_protocol_fee: u64,
    sol_protocol_fee: u64,
    processing_costs: ProcessingCosts,
) -> Result<()> {
    let rent_exempt_minimum = Rent::get()?.minimum_balance(0);
    pay_from_signer(
        &ctx.accounts.system_program.to_account_info(),
        &ctx.accounts.payer.to_account_info(),
        &ctx.accounts.sol_vault.to_account_info(),
        rent_exempt_minimum.saturating_sub(ctx.accounts.sol_vault.lamports()),
    )?;

    *ctx.accounts.relay_layer = RelayLayer {
        admin: ctx.accounts.admin.key(),
        new_admin: None,
        attester,
        executor_program,
        fees: FeeLedger::new(tac_protocol_fee, sol_protocol_fee),
        processing_costs,
        epoch: EpochState::new(epoch_delay, max_roots_size)?,
        roots: RootStore::default(),
    };

    Ok(())
}
