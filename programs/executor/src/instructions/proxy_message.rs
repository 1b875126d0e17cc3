use anchor_lang::prelude::*;
use common::{MerkleProof, EXECUTOR_SEED};
use relay_layer::program::RelayLayer as RelayLayerProgram;

use crate::{internal::proxy_message_internal, state::Executor};

#[derive(Accounts)]
pub struct ProxyMessage<'info> {
    /// The relayer delivering the batch and paying its attached value.
    #[account(mut)]
    pub relayer: Signer<'info>,

    #[account(
        mut,
        has_one = relay_layer,
        seeds = [EXECUTOR_SEED, relay_layer.key().as_ref(), executor.message_hash.as_ref()],
        bump = executor.bump
    )]
    pub executor: Account<'info, Executor>,

    /// CHECK: Checked by the relay layer program that we CPI into.
    #[account(mut)]
    pub relay_layer: UncheckedAccount<'info>,

    /// CHECK: Checked by the relay layer program that we CPI into.
    #[account(mut)]
    pub sol_vault: UncheckedAccount<'info>,

    /// CHECK: Checked by the relay layer program that we CPI into.
    #[account(mut)]
    pub fee_receiver: UncheckedAccount<'info>,

    /// CHECK: Checked by the relay layer program that we CPI into.
    #[account(mut)]
    pub response: Option<UncheckedAccount<'info>>,

    pub relay_layer_program: Program<'info, RelayLayerProgram>,

    pub system_program: Program<'info, System>,
}

/// Delivers the stored batch through the relay layer.
///
/// The Executor is marked spent before the relay layer is called. If the relay
/// layer rejects the batch the mark is rolled back, the rejection is reported
/// and the instruction still succeeds so that the report is kept.
pub fn proxy_message_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ProxyMessage<'info>>,
    query_id: u64,
    proof: MerkleProof,
    fee_to: Pubkey,
    response_address: Option<Pubkey>,
    msg_value: u64,
) -> Result<()> {
    proxy_message_internal(
        ctx.accounts,
        ctx.remaining_accounts,
        query_id,
        proof,
        fee_to,
        response_address,
        msg_value,
    )
}

#[event]
pub struct ProxyCompleted {
    pub query_id: u64,
    pub message_hash: [u8; 32],
    pub relayer: Pubkey,
}

#[event]
pub struct ProxyRejected {
    pub query_id: u64,
    pub message_hash: [u8; 32],
    pub relayer: Pubkey,
    pub error_code: u32,
}

#[error_code]
pub enum ExecutorError {
    #[msg("Executor already delivered its batch")]
    AlreadySpent,
    #[msg("Proof does not commit to a root")]
    ProofWithoutRoot,
    #[msg("Proof is deeper than any attested tree")]
    ProofTooDeep,
    #[msg("Invalid proof")]
    InvalidProof,
    #[msg("Relayer is not allowed to execute this batch")]
    UnauthorizedExecutor,
    #[msg("Message does not hash to the given message hash")]
    MessageHashMismatch,
}
