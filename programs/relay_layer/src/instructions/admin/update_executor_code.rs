use anchor_lang::prelude::*;

use crate::instructions::AdminOnly;

/// Replaces the program Executors are derived from.
///
/// Stored roots are cleared: batches attested for Executors of the previous
/// program can no longer be delivered.
pub fn update_executor_code_handler(
    ctx: Context<AdminOnly>,
    new_executor_program: Pubkey,
) -> Result<()> {
    let relay_layer = &mut ctx.accounts.relay_layer;
    let old_executor_program = relay_layer.executor_program;

    relay_layer.executor_program = new_executor_program;
    relay_layer.roots.clear();

    emit!(ExecutorProgramUpdated {
        old_executor_program,
        new_executor_program,
    });

    Ok(())
}

#[event]
pub struct ExecutorProgramUpdated {
    pub old_executor_program: Pubkey,
    pub new_executor_program: Pubkey,
}
