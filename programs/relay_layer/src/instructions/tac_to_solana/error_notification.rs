use anchor_lang::prelude::*;

use crate::{constants::RELAY_LAYER_SEED, error::RelayLayerError, state::RelayLayer};

#[derive(Accounts)]
pub struct ErrorNotification<'info> {
    pub executor: Signer<'info>,

    #[account(seeds = [RELAY_LAYER_SEED], bump)]
    pub relay_layer: Account<'info, RelayLayer>,
}

/// Records that the Executor of `message_hash` could not deliver its batch.
pub fn error_notification_handler(
    ctx: Context<ErrorNotification>,
    query_id: u64,
    message_hash: [u8; 32],
    error_code: u32,
) -> Result<()> {
    let relay_layer_key = ctx.accounts.relay_layer.key();
    require_keys_eq!(
        ctx.accounts.executor.key(),
        ctx.accounts
            .relay_layer
            .executor_address(&relay_layer_key, &message_hash),
        RelayLayerError::NotFromExecutor
    );

    emit!(ExecutionFailed {
        query_id,
        message_hash,
        executor: ctx.accounts.executor.key(),
        error_code,
    });

    Ok(())
}

#[event]
pub struct ExecutionFailed {
    pub query_id: u64,
    pub message_hash: [u8; 32],
    pub executor: Pubkey,
    pub error_code: u32,
}
