use anchor_lang::{
    prelude::*,
    solana_program::keccak,
    system_program::{self, Allocate, Assign, CreateAccount},
};
use anchor_spl::{
    token::ID as TOKEN_PROGRAM_ID,
    token_2022::ID as TOKEN_2022_PROGRAM_ID,
    token_interface::{self, MintTo, TokenAccount},
};
use common::{MerkleProof, Message};

use crate::{
    constants::{DEPLOYED_ACCOUNT_SEED, RELAY_LAYER_SEED, SOL_VAULT_SEED},
    error::RelayLayerError,
    internal::{available_reserve, pay_from_signer, pay_from_vault, InboundPlan},
    state::RelayLayer,
};

/// Result of a forward call that passed the executor check.
///
/// A rejected batch leaves every account untouched so that the Executor can
/// roll back its spent flag and the batch can be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum ForwardOutcome {
    Delivered,
    Rejected { error_code: u32 },
}

impl ForwardOutcome {
    pub fn rejected(err: RelayLayerError) -> Self {
        Self::Rejected {
            error_code: u32::from(err),
        }
    }
}

#[derive(Accounts)]
pub struct ExecutorForward<'info> {
    /// The Executor PDA holding the batch, signing through the executor program.
    pub executor: Signer<'info>,

    /// The relayer paying the attached value.
    #[account(mut)]
    pub relayer: Signer<'info>,

    #[account(mut, seeds = [RELAY_LAYER_SEED], bump)]
    pub relay_layer: Account<'info, RelayLayer>,

    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    /// CHECK: Matched against `fee_to` (native fee) or against a token account
    /// of the fee mint owned by `fee_to` (token fee) before any transfer.
    #[account(mut)]
    pub fee_receiver: UncheckedAccount<'info>,

    /// CHECK: Must be the account named by `response_address`.
    #[account(mut)]
    pub response: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

/// Delivers a verified batch.
///
/// Only the Executor derived for `message` may call this; any other failure
/// is reported through [`ForwardOutcome::Rejected`] without side effects.
///
/// # Remaining accounts
/// * One writable account per entry, in entry order
/// * The fee mint and the token program, when the executor fee is a token
#[allow(clippy::too_many_arguments)]
pub fn executor_forward_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ExecutorForward<'info>>,
    query_id: u64,
    message: Message,
    proof: MerkleProof,
    fee_to: Pubkey,
    response_address: Option<Pubkey>,
    msg_value: u64,
) -> Result<ForwardOutcome> {
    let message_hash = message.hash();
    let relay_layer_key = ctx.accounts.relay_layer.key();
    require_keys_eq!(
        ctx.accounts.executor.key(),
        ctx.accounts
            .relay_layer
            .executor_address(&relay_layer_key, &message_hash),
        RelayLayerError::NotFromExecutor
    );

    let rent = Rent::get()?;
    let reserve = available_reserve(
        &ctx.accounts.sol_vault,
        ctx.accounts.relay_layer.fees.protocol_fee_supply,
    )?;

    let delivery = match check_delivery(
        &ctx.accounts,
        ctx.remaining_accounts,
        &message,
        &message_hash,
        &proof,
        &fee_to,
        response_address,
        msg_value,
        &rent,
        reserve,
    ) {
        Ok(delivery) => delivery,
        Err(err) => {
            msg!("Rejected batch {}: {}", hex::encode(message_hash), err);
            return Ok(ForwardOutcome::rejected(err));
        }
    };

    deliver(&ctx, &message, &delivery)?;

    let plan = delivery.plan;
    ctx.accounts.relay_layer.fees.accrue(plan.protocol_fee)?;

    if delivery.refund_excess {
        if let Some(response) = &ctx.accounts.response {
            pay_from_signer(
                &ctx.accounts.system_program.to_account_info(),
                &ctx.accounts.relayer.to_account_info(),
                &response.to_account_info(),
                plan.excess,
            )?;
        }
    }

    emit!(MessageDelivered {
        query_id,
        message_hash,
        executor: ctx.accounts.executor.key(),
        relayer: ctx.accounts.relayer.key(),
        fee_to,
        protocol_fee: plan.protocol_fee,
        message,
    });

    Ok(ForwardOutcome::Delivered)
}

enum FeeAccounts<'info> {
    Native,
    Token {
        mint: &'info AccountInfo<'info>,
        token_program: &'info AccountInfo<'info>,
    },
}

struct Delivery<'info> {
    plan: InboundPlan,
    /// The excess goes to a response account other than the relayer.
    refund_excess: bool,
    destinations: &'info [AccountInfo<'info>],
    fee_accounts: FeeAccounts<'info>,
}

#[allow(clippy::too_many_arguments)]
fn check_delivery<'info>(
    accounts: &ExecutorForward<'info>,
    remaining_accounts: &'info [AccountInfo<'info>],
    message: &Message,
    message_hash: &[u8; 32],
    proof: &MerkleProof,
    fee_to: &Pubkey,
    response_address: Option<Pubkey>,
    msg_value: u64,
    rent: &Rent,
    reserve: u64,
) -> std::result::Result<Delivery<'info>, RelayLayerError> {
    let relay_layer = &accounts.relay_layer;

    if !relay_layer.roots.contains(&proof.root) || !proof.verify(message_hash) {
        return Err(RelayLayerError::InvalidProof);
    }

    let relayer = accounts.relayer.key();
    let refund_to = response_address.unwrap_or(relayer);
    let refund_excess = match &accounts.response {
        Some(response) if response.key() == refund_to => refund_to != relayer,
        None if refund_to == relayer => false,
        _ => return Err(RelayLayerError::InvalidResponseAddress),
    };

    let plan = InboundPlan::new(
        message,
        msg_value,
        &relay_layer.fees,
        &relay_layer.processing_costs,
    )?;
    let relayer_outlay = if refund_excess {
        plan.relayer_spend().checked_add(plan.excess)
    } else {
        Some(plan.relayer_spend())
    }
    .ok_or(RelayLayerError::ArithmeticOverflow)?;
    if accounts.relayer.lamports() < relayer_outlay {
        return Err(RelayLayerError::NotEnoughSol);
    }

    plan.check_reserve(reserve)?;

    let entries = message.entries.len();
    if remaining_accounts.len() < entries {
        return Err(RelayLayerError::InvalidDestinationAccounts);
    }
    let (destinations, fee_accounts) = remaining_accounts.split_at(entries);

    for (entry, destination) in message.entries.iter().zip(destinations) {
        if destination.key() != entry.destination || !destination.is_writable {
            return Err(RelayLayerError::InvalidDestinationAccounts);
        }

        if let Some(state_init) = &entry.state_init {
            if deployed_address(state_init).0 != entry.destination {
                return Err(RelayLayerError::InvalidStateInit);
            }
            let funded = destination
                .lamports()
                .saturating_add(entry.destination_msg_value);
            if is_undeployed(destination) && funded < rent.minimum_balance(state_init.len()) {
                return Err(RelayLayerError::NotEnoughSol);
            }
        }
    }

    let fee_accounts = match message.executor_fee_token {
        None => {
            if accounts.fee_receiver.key() != *fee_to {
                return Err(RelayLayerError::InvalidExecutorFeeAccounts);
            }
            FeeAccounts::Native
        }
        Some(fee_mint) => {
            let [mint, token_program, ..] = fee_accounts else {
                return Err(RelayLayerError::InvalidExecutorFeeAccounts);
            };
            check_token_fee_accounts(
                &accounts.fee_receiver,
                mint,
                token_program,
                &fee_mint,
                fee_to,
            )?;
            FeeAccounts::Token {
                mint,
                token_program,
            }
        }
    };

    Ok(Delivery {
        plan,
        refund_excess,
        destinations,
        fee_accounts,
    })
}

fn check_token_fee_accounts(
    fee_receiver: &AccountInfo,
    mint: &AccountInfo,
    token_program: &AccountInfo,
    fee_mint: &Pubkey,
    fee_to: &Pubkey,
) -> std::result::Result<(), RelayLayerError> {
    let token_program_id = token_program.key();
    let is_token_program =
        token_program_id == TOKEN_PROGRAM_ID || token_program_id == TOKEN_2022_PROGRAM_ID;

    if mint.key() != *fee_mint
        || !mint.is_writable
        || !is_token_program
        || *mint.owner != token_program_id
        || *fee_receiver.owner != token_program_id
    {
        return Err(RelayLayerError::InvalidExecutorFeeAccounts);
    }

    let data = fee_receiver
        .try_borrow_data()
        .map_err(|_| RelayLayerError::InvalidExecutorFeeAccounts)?;
    let token_account = TokenAccount::try_deserialize(&mut &data[..])
        .map_err(|_| RelayLayerError::InvalidExecutorFeeAccounts)?;
    if token_account.mint != *fee_mint || token_account.owner != *fee_to {
        return Err(RelayLayerError::InvalidExecutorFeeAccounts);
    }

    Ok(())
}

/// A `deployed` address that holds no code yet, possibly pre-funded.
fn is_undeployed(account: &AccountInfo) -> bool {
    *account.owner == system_program::ID && account.data_is_empty()
}

/// Address of the account created from `state_init`, with its bump.
pub fn deployed_address(state_init: &[u8]) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[DEPLOYED_ACCOUNT_SEED, &keccak::hash(state_init).to_bytes()],
        &crate::ID,
    )
}

fn deliver<'info>(
    ctx: &Context<'_, '_, 'info, 'info, ExecutorForward<'info>>,
    message: &Message,
    delivery: &Delivery<'info>,
) -> Result<()> {
    let system_program = ctx.accounts.system_program.to_account_info();
    let relayer = ctx.accounts.relayer.to_account_info();
    let sol_vault = ctx.accounts.sol_vault.to_account_info();
    let sol_vault_bump = ctx.bumps.sol_vault;

    for (entry, destination) in message.entries.iter().zip(delivery.destinations) {
        let value = entry.destination_msg_value;
        let vault_bump = entry.need_to_unlock_sol.then_some(sol_vault_bump);
        let from = if entry.need_to_unlock_sol {
            &sol_vault
        } else {
            &relayer
        };

        match &entry.state_init {
            Some(state_init) if is_undeployed(destination) => {
                deploy_state_init(
                    &system_program,
                    from,
                    vault_bump,
                    destination,
                    state_init,
                    value,
                )?;
            }
            _ => match vault_bump {
                Some(bump) => pay_from_vault(&system_program, from, bump, destination, value)?,
                None => pay_from_signer(&system_program, from, destination, value)?,
            },
        }
    }

    pay_from_signer(
        &system_program,
        &relayer,
        &sol_vault,
        delivery.plan.vault_deposit(),
    )?;

    match delivery.fee_accounts {
        FeeAccounts::Native => pay_from_vault(
            &system_program,
            &sol_vault,
            sol_vault_bump,
            &ctx.accounts.fee_receiver.to_account_info(),
            delivery.plan.native_executor_fee,
        )?,
        FeeAccounts::Token {
            mint,
            token_program,
        } => {
            if message.executor_fee_value > 0 {
                let seeds: &[&[&[u8]]] = &[&[RELAY_LAYER_SEED, &[ctx.bumps.relay_layer]]];
                token_interface::mint_to(
                    CpiContext::new_with_signer(
                        token_program.clone(),
                        MintTo {
                            mint: mint.clone(),
                            to: ctx.accounts.fee_receiver.to_account_info(),
                            authority: ctx.accounts.relay_layer.to_account_info(),
                        },
                        seeds,
                    ),
                    message.executor_fee_value,
                )?;
            }
        }
    }

    Ok(())
}

/// Deploys `state_init` at its `deployed` address, funded with `value` from
/// `from` (the vault when `vault_bump` is set).
///
/// An empty address is created in one go. A pre-funded one keeps its balance,
/// receives `value` and is then allocated and assigned, as Anchor's `init`
/// does for funded PDAs.
fn deploy_state_init<'info>(
    system_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    vault_bump: Option<u8>,
    destination: &AccountInfo<'info>,
    state_init: &[u8],
    value: u64,
) -> Result<()> {
    let (_, bump) = deployed_address(state_init);
    let state_init_hash = keccak::hash(state_init).to_bytes();
    let deployed_seeds: &[&[u8]] = &[DEPLOYED_ACCOUNT_SEED, &state_init_hash, &[bump]];
    let space = state_init.len() as u64;

    if destination.lamports() == 0 {
        let vault_seeds: &[&[u8]] = &[SOL_VAULT_SEED, &[vault_bump.unwrap_or_default()]];
        let signer_seeds = match vault_bump {
            Some(_) => vec![vault_seeds, deployed_seeds],
            None => vec![deployed_seeds],
        };

        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: from.clone(),
                    to: destination.clone(),
                },
                &signer_seeds,
            ),
            value,
            space,
            &crate::ID,
        )?;
    } else {
        match vault_bump {
            Some(bump) => pay_from_vault(system_program, from, bump, destination, value)?,
            None => pay_from_signer(system_program, from, destination, value)?,
        }

        system_program::allocate(
            CpiContext::new_with_signer(
                system_program.clone(),
                Allocate {
                    account_to_allocate: destination.clone(),
                },
                &[deployed_seeds],
            ),
            space,
        )?;
        system_program::assign(
            CpiContext::new_with_signer(
                system_program.clone(),
                Assign {
                    account_to_assign: destination.clone(),
                },
                &[deployed_seeds],
            ),
            &crate::ID,
        )?;
    }

    destination
        .try_borrow_mut_data()?
        .copy_from_slice(state_init);

    Ok(())
}

#[event]
pub struct MessageDelivered {
    pub query_id: u64,
    pub message_hash: [u8; 32],
    pub executor: Pubkey,
    pub relayer: Pubkey,
    pub fee_to: Pubkey,
    pub protocol_fee: u64,
    pub message: Message,
}
