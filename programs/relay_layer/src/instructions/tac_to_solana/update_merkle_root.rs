use anchor_lang::prelude::*;

use crate::{constants::RELAY_LAYER_SEED, error::RelayLayerError, state::RelayLayer};

#[derive(Accounts)]
pub struct UpdateMerkleRoot<'info> {
    #[account(
        mut,
        has_one = attester @ RelayLayerError::NotFromAttester,
        seeds = [RELAY_LAYER_SEED],
        bump
    )]
    pub relay_layer: Account<'info, RelayLayer>,

    pub attester: Signer<'info>,
}

pub fn update_merkle_root_handler(
    ctx: Context<UpdateMerkleRoot>,
    query_id: u64,
    merkle_root: [u8; 32],
    message_collect_end_time: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let relay_layer = &mut ctx.accounts.relay_layer;

    let prev_message_collect_end_time = relay_layer.epoch.message_collect_end_time;
    relay_layer.rotate_root(merkle_root, now, message_collect_end_time)?;

    emit!(MerkleRootUpdated {
        query_id,
        merkle_root,
        prev_message_collect_end_time,
        message_collect_end_time,
        prev_epoch: relay_layer.epoch.prev_epoch,
        curr_epoch: relay_layer.epoch.curr_epoch,
        next_voting_time: relay_layer.epoch.next_voting_time,
    });

    Ok(())
}

#[event]
pub struct MerkleRootUpdated {
    pub query_id: u64,
    pub merkle_root: [u8; 32],
    pub prev_message_collect_end_time: i64,
    pub message_collect_end_time: i64,
    pub prev_epoch: i64,
    pub curr_epoch: i64,
    pub next_voting_time: i64,
}
