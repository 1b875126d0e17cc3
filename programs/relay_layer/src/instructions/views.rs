use anchor_lang::prelude::*;
use common::{executor_address, Message};

use crate::{
    constants::RELAY_LAYER_SEED,
    state::{EpochInfo, RelayLayer},
};

/// Accounts struct for the read-only views. Call them through transaction
/// simulation and read the return data.
#[derive(Accounts)]
pub struct RelayLayerView<'info> {
    #[account(seeds = [RELAY_LAYER_SEED], bump)]
    pub relay_layer: Account<'info, RelayLayer>,
}

pub fn get_full_data_handler(ctx: Context<RelayLayerView>) -> Result<RelayLayer> {
    Ok((*ctx.accounts.relay_layer).clone())
}

pub fn get_current_epoch_info_handler(ctx: Context<RelayLayerView>) -> Result<EpochInfo> {
    Ok(EpochInfo::from(&*ctx.accounts.relay_layer))
}

pub fn get_executor_address_handler(
    ctx: Context<RelayLayerView>,
    message: Message,
) -> Result<Pubkey> {
    let relay_layer = &ctx.accounts.relay_layer;
    Ok(relay_layer.executor_address(&relay_layer.key(), &message.hash()))
}

/// Everything needed to deploy the Executor of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct ExecutorData {
    pub address: Pubkey,
    pub bump: u8,
    pub executor_program: Pubkey,
    pub relay_layer: Pubkey,
    pub message_hash: [u8; 32],
}

pub fn get_executor_data_handler(
    ctx: Context<RelayLayerView>,
    message_hash: [u8; 32],
) -> Result<ExecutorData> {
    let relay_layer = ctx.accounts.relay_layer.key();
    let executor_program = ctx.accounts.relay_layer.executor_program;
    let (address, bump) = executor_address(&executor_program, &relay_layer, &message_hash);

    Ok(ExecutorData {
        address,
        bump,
        executor_program,
        relay_layer,
        message_hash,
    })
}
