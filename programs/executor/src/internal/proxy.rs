use anchor_lang::prelude::*;
use common::{MalformedProof, MerkleProof, EXECUTOR_SEED};
use relay_layer::{cpi as relay_layer_cpi, instructions::ForwardOutcome};

use crate::instructions::{ExecutorError, ProxyCompleted, ProxyMessage, ProxyRejected};

/// Shared by `proxy_message` and `proxy_message_buffered`, which only differ in
/// where the proof comes from.
pub fn proxy_message_internal<'info>(
    accounts: &mut ProxyMessage<'info>,
    remaining_accounts: &[AccountInfo<'info>],
    query_id: u64,
    proof: MerkleProof,
    fee_to: Pubkey,
    response_address: Option<Pubkey>,
    msg_value: u64,
) -> Result<()> {
    let relayer = accounts.relayer.key();
    let message_hash = accounts.executor.message_hash;

    {
        let executor = &accounts.executor;
        require!(!executor.is_spent, ExecutorError::AlreadySpent);
        proof.check_well_formed().map_err(|err| match err {
            MalformedProof::MissingRoot => ExecutorError::ProofWithoutRoot,
            MalformedProof::TooDeep => ExecutorError::ProofTooDeep,
        })?;
        require!(proof.verify(&message_hash), ExecutorError::InvalidProof);
        require!(
            executor.payload.is_valid_executor(&relayer),
            ExecutorError::UnauthorizedExecutor
        );
    }

    accounts.executor.is_spent = true;
    accounts.executor.last_executor = Some(relayer);

    let outcome = forward(
        accounts,
        remaining_accounts,
        query_id,
        proof,
        fee_to,
        response_address,
        msg_value,
    )?;

    match outcome {
        ForwardOutcome::Delivered => {
            emit!(ProxyCompleted {
                query_id,
                message_hash,
                relayer,
            });
        }
        ForwardOutcome::Rejected { error_code } => {
            accounts.executor.is_spent = false;
            accounts.executor.last_executor = None;

            notify_error(accounts, query_id, message_hash, error_code)?;

            emit!(ProxyRejected {
                query_id,
                message_hash,
                relayer,
                error_code,
            });
        }
    }

    Ok(())
}

fn forward<'info>(
    accounts: &ProxyMessage<'info>,
    remaining_accounts: &[AccountInfo<'info>],
    query_id: u64,
    proof: MerkleProof,
    fee_to: Pubkey,
    response_address: Option<Pubkey>,
    msg_value: u64,
) -> Result<ForwardOutcome> {
    let executor = &accounts.executor;
    let relay_layer = accounts.relay_layer.key();
    let seeds: &[&[&[u8]]] = &[&[
        EXECUTOR_SEED,
        relay_layer.as_ref(),
        executor.message_hash.as_ref(),
        &[executor.bump],
    ]];

    let cpi_ctx = CpiContext::new_with_signer(
        accounts.relay_layer_program.to_account_info(),
        relay_layer_cpi::accounts::ExecutorForward {
            executor: executor.to_account_info(),
            relayer: accounts.relayer.to_account_info(),
            relay_layer: accounts.relay_layer.to_account_info(),
            sol_vault: accounts.sol_vault.to_account_info(),
            fee_receiver: accounts.fee_receiver.to_account_info(),
            response: accounts
                .response
                .as_ref()
                .map(|response| response.to_account_info()),
            system_program: accounts.system_program.to_account_info(),
        },
        seeds,
    )
    .with_remaining_accounts(remaining_accounts.to_vec());

    let outcome = relay_layer_cpi::executor_forward(
        cpi_ctx,
        query_id,
        executor.payload.clone(),
        proof,
        fee_to,
        response_address,
        msg_value,
    )?;

    Ok(outcome.get())
}

fn notify_error(
    accounts: &ProxyMessage,
    query_id: u64,
    message_hash: [u8; 32],
    error_code: u32,
) -> Result<()> {
    let executor = &accounts.executor;
    let relay_layer = accounts.relay_layer.key();
    let seeds: &[&[&[u8]]] = &[&[
        EXECUTOR_SEED,
        relay_layer.as_ref(),
        message_hash.as_ref(),
        &[executor.bump],
    ]];

    let cpi_ctx = CpiContext::new_with_signer(
        accounts.relay_layer_program.to_account_info(),
        relay_layer_cpi::accounts::ErrorNotification {
            executor: executor.to_account_info(),
            relay_layer: accounts.relay_layer.to_account_info(),
        },
        seeds,
    );

    msg!(
        "Batch {} rejected with code {}",
        hex::encode(message_hash),
        error_code
    );
    relay_layer_cpi::error_notification(cpi_ctx, query_id, message_hash, error_code)
}
