use anchor_lang::prelude::*;

use crate::instructions::AdminOnly;

pub fn change_attester_handler(ctx: Context<AdminOnly>, new_attester: Pubkey) -> Result<()> {
    let old_attester = ctx.accounts.relay_layer.attester;
    ctx.accounts.relay_layer.attester = new_attester;

    emit!(AttesterChanged {
        old_attester,
        new_attester,
    });

    Ok(())
}

#[event]
pub struct AttesterChanged {
    pub old_attester: Pubkey,
    pub new_attester: Pubkey,
}
