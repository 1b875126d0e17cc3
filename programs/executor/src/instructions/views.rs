use anchor_lang::prelude::*;
use common::MerkleProof;

use crate::state::Executor;

#[derive(Accounts)]
pub struct ExecutorView<'info> {
    pub executor: Account<'info, Executor>,
}

pub fn get_full_data_handler(ctx: Context<ExecutorView>) -> Result<Executor> {
    Ok((*ctx.accounts.executor).clone())
}

/// Whether `proof` proves the stored batch, regardless of the roots the relay
/// layer currently holds.
pub fn check_proof_handler(ctx: Context<ExecutorView>, proof: MerkleProof) -> Result<bool> {
    Ok(proof.verify(&ctx.accounts.executor.message_hash))
}

pub fn is_valid_executor_handler(ctx: Context<ExecutorView>, relayer: Pubkey) -> Result<bool> {
    Ok(ctx.accounts.executor.payload.is_valid_executor(&relayer))
}
