use anchor_lang::prelude::*;
use common::executor_address;

use crate::{
    error::RelayLayerError,
    state::{EpochState, FeeLedger, MerkleRoot, ProcessingCosts, RootStore},
};

#[account]
#[derive(Debug, PartialEq, Eq, InitSpace)]
pub struct RelayLayer {
    pub admin: Pubkey,
    /// Admin proposed by `change_admin`, waiting for confirmation.
    pub new_admin: Option<Pubkey>,
    /// Sequencer multisig submitting Merkle roots and collecting protocol fees.
    pub attester: Pubkey,
    /// Program Executors are derived from. Replacing it orphans every Executor
    /// deployed under the previous program.
    pub executor_program: Pubkey,
    pub fees: FeeLedger,
    pub processing_costs: ProcessingCosts,
    pub epoch: EpochState,
    pub roots: RootStore,
}

impl RelayLayer {
    /// Accepts `root` for a new epoch starting at `now`.
    pub fn rotate_root(
        &mut self,
        root: [u8; 32],
        now: i64,
        message_collect_end_time: i64,
    ) -> std::result::Result<(), RelayLayerError> {
        self.epoch.advance(now, message_collect_end_time)?;

        self.roots.insert(
            MerkleRoot {
                root,
                valid_timestamp: self.epoch.next_voting_time,
            },
            self.epoch.eviction_threshold(),
            self.epoch.max_roots_size as usize,
        );

        Ok(())
    }

    pub fn executor_address(&self, relay_layer: &Pubkey, message_hash: &[u8; 32]) -> Pubkey {
        executor_address(&self.executor_program, relay_layer, message_hash).0
    }
}

/// Summary of the current epoch returned by `get_current_epoch_info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct EpochInfo {
    pub last_merkle_root: Option<MerkleRoot>,
    pub prev_epoch: i64,
    pub curr_epoch: i64,
    pub message_collect_end_time: i64,
    pub next_voting_time: i64,
    pub epoch_delay: i64,
    pub max_roots_size: u8,
}

impl From<&RelayLayer> for EpochInfo {
    fn from(relay_layer: &RelayLayer) -> Self {
        Self {
            last_merkle_root: relay_layer.roots.latest().copied(),
            prev_epoch: relay_layer.epoch.prev_epoch,
            curr_epoch: relay_layer.epoch.curr_epoch,
            message_collect_end_time: relay_layer.epoch.message_collect_end_time,
            next_voting_time: relay_layer.epoch.next_voting_time,
            epoch_delay: relay_layer.epoch.epoch_delay,
            max_roots_size: relay_layer.epoch.max_roots_size,
        }
    }
}
