use anchor_lang::prelude::*;
use common::Message;

use crate::{instructions::ExecutorError, state::Executor};

/// Stores `message` in a freshly created Executor once it matches `message_hash`.
pub fn deploy_internal(
    executor: &mut Account<Executor>,
    relay_layer: Pubkey,
    bump: u8,
    message_hash: [u8; 32],
    message: Message,
) -> Result<()> {
    require!(
        message.hash() == message_hash,
        ExecutorError::MessageHashMismatch
    );

    **executor = Executor {
        relay_layer,
        message_hash,
        bump,
        is_spent: false,
        last_executor: None,
        payload: message,
    };

    Ok(())
}
