use anchor_lang::prelude::*;

use crate::{
    instructions::AdminOnly,
    state::{ProcessingCosts, RelayLayer},
};

/// Set the number of seconds between two root updates
pub fn update_epoch_delay_handler(ctx: Context<AdminOnly>, epoch_delay: i64) -> Result<()> {
    ctx.accounts.relay_layer.epoch.set_epoch_delay(epoch_delay)?;
    emit_parameters(&ctx.accounts.relay_layer);
    Ok(())
}

/// Set the protocol fee charged for the TAC leg of a message
pub fn update_tac_protocol_fee_handler(
    ctx: Context<AdminOnly>,
    tac_protocol_fee: u64,
) -> Result<()> {
    ctx.accounts.relay_layer.fees.tac_protocol_fee = tac_protocol_fee;
    emit_parameters(&ctx.accounts.relay_layer);
    Ok(())
}

/// Set the protocol fee charged for the Solana leg of a message
pub fn update_sol_protocol_fee_handler(
    ctx: Context<AdminOnly>,
    sol_protocol_fee: u64,
) -> Result<()> {
    ctx.accounts.relay_layer.fees.sol_protocol_fee = sol_protocol_fee;
    emit_parameters(&ctx.accounts.relay_layer);
    Ok(())
}

pub fn set_processing_costs_handler(
    ctx: Context<AdminOnly>,
    processing_costs: ProcessingCosts,
) -> Result<()> {
    ctx.accounts.relay_layer.processing_costs = processing_costs;
    emit_parameters(&ctx.accounts.relay_layer);
    Ok(())
}

fn emit_parameters(relay_layer: &RelayLayer) {
    emit!(ParametersUpdated {
        epoch_delay: relay_layer.epoch.epoch_delay,
        tac_protocol_fee: relay_layer.fees.tac_protocol_fee,
        sol_protocol_fee: relay_layer.fees.sol_protocol_fee,
        processing_costs: relay_layer.processing_costs,
    });
}

/// Snapshot of the tunable parameters after an update
#[event]
pub struct ParametersUpdated {
    pub epoch_delay: i64,
    pub tac_protocol_fee: u64,
    pub sol_protocol_fee: u64,
    pub processing_costs: ProcessingCosts,
}
