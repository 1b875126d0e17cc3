use anchor_lang::prelude::*;

use crate::{
    constants::{RELAY_LAYER_SEED, SOL_VAULT_SEED},
    error::RelayLayerError,
    internal::{pay_from_signer, OutboundPlan},
    state::{FeeData, RelayLayer},
};

/// Accounts struct for the send_message instruction that hands a message to the
/// sequencer. The attached SOL is locked in the vault until a TAC batch unlocks it.
#[derive(Accounts)]
pub struct SendMessage<'info> {
    /// The account sending the message and paying the attached value.
    #[account(mut)]
    pub sender: Signer<'info>,

    /// The relay layer state holding fee rates and the protocol fee supply.
    #[account(mut, seeds = [RELAY_LAYER_SEED], bump)]
    pub relay_layer: Account<'info, RelayLayer>,

    /// The vault receiving the locked amount and declared fees.
    #[account(mut, seeds = [SOL_VAULT_SEED], bump)]
    pub sol_vault: SystemAccount<'info>,

    /// Receives the part of `msg_value` left over. May only be omitted when the
    /// excess goes back to the sender, in which case it is never taken.
    ///
    /// CHECK: Must be the response address, or the sender when none is given.
    #[account(mut)]
    pub response: Option<UncheckedAccount<'info>>,

    pub system_program: Program<'info, System>,
}

#[allow(clippy::too_many_arguments)]
pub fn send_message_handler(
    ctx: Context<SendMessage>,
    query_id: u64,
    operation_type: u32,
    cross_chain_amount: u64,
    fee_data: Option<FeeData>,
    payload: Vec<u8>,
    response_address: Option<Pubkey>,
    msg_value: u64,
) -> Result<()> {
    let sender = ctx.accounts.sender.key();
    let refund_to = response_address.unwrap_or(sender);
    let response = ctx
        .accounts
        .response
        .as_ref()
        .map_or(sender, |response| response.key());
    require_keys_eq!(response, refund_to, RelayLayerError::InvalidResponseAddress);

    let relay_layer = &mut ctx.accounts.relay_layer;
    let plan = OutboundPlan::new(
        cross_chain_amount,
        fee_data.as_ref(),
        msg_value,
        &relay_layer.fees,
        &relay_layer.processing_costs,
    )?;

    pay_from_signer(
        &ctx.accounts.system_program.to_account_info(),
        &ctx.accounts.sender.to_account_info(),
        &ctx.accounts.sol_vault.to_account_info(),
        plan.vault_deposit,
    )?;
    relay_layer.fees.accrue(plan.protocol_fee)?;

    if let Some(response) = &ctx.accounts.response {
        if response.key() != sender {
            pay_from_signer(
                &ctx.accounts.system_program.to_account_info(),
                &ctx.accounts.sender.to_account_info(),
                &response.to_account_info(),
                plan.excess,
            )?;
        }
    }

    emit!(MessageToTac {
        query_id,
        operation_type,
        sender,
        cross_chain_amount,
        fee_data,
        tac_protocol_fee: relay_layer.fees.tac_protocol_fee,
        sol_protocol_fee: relay_layer.fees.sol_protocol_fee,
        response_address,
        payload,
    });

    Ok(())
}

#[event]
pub struct MessageToTac {
    pub query_id: u64,
    pub operation_type: u32,
    pub sender: Pubkey,
    pub cross_chain_amount: u64,
    pub fee_data: Option<FeeData>,
    pub tac_protocol_fee: u64,
    pub sol_protocol_fee: u64,
    pub response_address: Option<Pubkey>,
    pub payload: Vec<u8>,
}
