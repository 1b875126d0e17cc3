use anchor_lang::prelude::*;

use super::AdminOnly;
use crate::{constants::RELAY_LAYER_SEED, error::RelayLayerError, state::RelayLayer};

/// Proposes `new_admin`. The change takes effect once the proposed admin
/// confirms it.
pub fn change_admin_handler(ctx: Context<AdminOnly>, new_admin: Option<Pubkey>) -> Result<()> {
    let new_admin = new_admin.ok_or(RelayLayerError::NewAdminAddressIsNone)?;
    ctx.accounts.relay_layer.new_admin = Some(new_admin);

    emit!(AdminChangeProposed {
        admin: ctx.accounts.admin.key(),
        new_admin,
    });

    Ok(())
}

pub fn cancel_changing_admin_handler(ctx: Context<AdminOnly>) -> Result<()> {
    if let Some(new_admin) = ctx.accounts.relay_layer.new_admin.take() {
        emit!(AdminChangeCancelled { new_admin });
    }

    Ok(())
}

#[derive(Accounts)]
pub struct ConfirmChangingAdmin<'info> {
    #[account(mut, seeds = [RELAY_LAYER_SEED], bump)]
    pub relay_layer: Account<'info, RelayLayer>,

    /// The pending admin accepting the role
    pub new_admin: Signer<'info>,
}

pub fn confirm_changing_admin_handler(ctx: Context<ConfirmChangingAdmin>) -> Result<()> {
    let relay_layer = &mut ctx.accounts.relay_layer;
    let new_admin = ctx.accounts.new_admin.key();
    require!(
        relay_layer.new_admin == Some(new_admin),
        RelayLayerError::NotFromNewAdmin
    );

    let old_admin = relay_layer.admin;
    relay_layer.admin = new_admin;
    relay_layer.new_admin = None;

    emit!(AdminChanged {
        old_admin,
        new_admin,
    });

    Ok(())
}

#[event]
pub struct AdminChangeProposed {
    pub admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct AdminChangeCancelled {
    pub new_admin: Pubkey,
}

#[event]
pub struct AdminChanged {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
