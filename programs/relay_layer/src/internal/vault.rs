use anchor_lang::{
    prelude::*,
    system_program::{self, Transfer},
};

use crate::constants::SOL_VAULT_SEED;

/// Moves `amount` lamports out of the SOL vault.
pub fn pay_from_vault<'info>(
    system_program: &AccountInfo<'info>,
    sol_vault: &AccountInfo<'info>,
    sol_vault_bump: u8,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let seeds: &[&[&[u8]]] = &[&[SOL_VAULT_SEED, &[sol_vault_bump]]];
    let cpi_ctx = CpiContext::new_with_signer(
        system_program.clone(),
        Transfer {
            from: sol_vault.clone(),
            to: to.clone(),
        },
        seeds,
    );
    system_program::transfer(cpi_ctx, amount)
}

/// Moves `amount` lamports from a signer to `to`.
pub fn pay_from_signer<'info>(
    system_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let cpi_ctx = CpiContext::new(
        system_program.clone(),
        Transfer {
            from: from.clone(),
            to: to.clone(),
        },
    );
    system_program::transfer(cpi_ctx, amount)
}

/// Vault lamports not owed to the attester nor needed for rent exemption.
pub fn available_reserve(sol_vault: &AccountInfo, protocol_fee_supply: u64) -> Result<u64> {
    let rent_exempt_minimum = Rent::get()?.minimum_balance(0);
    Ok(sol_vault
        .lamports()
        .saturating_sub(rent_exempt_minimum)
        .saturating_sub(protocol_fee_supply))
}
