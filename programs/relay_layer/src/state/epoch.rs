use anchor_lang::prelude::*;

use crate::{constants::MAX_ROOTS_CAPACITY, error::RelayLayerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct EpochState {
    /// Unix timestamp of the previous accepted root update.
    pub prev_epoch: i64,
    /// Unix timestamp of the last accepted root update.
    pub curr_epoch: i64,
    /// Seconds between two root updates.
    pub epoch_delay: i64,
    /// End of the TAC-side collection window covered by the last root.
    pub message_collect_end_time: i64,
    /// Earliest timestamp at which the next root may be submitted.
    pub next_voting_time: i64,
    /// Number of epochs a root is retained for.
    pub max_roots_size: u8,
}

impl EpochState {
    pub fn new(epoch_delay: i64, max_roots_size: u8) -> std::result::Result<Self, RelayLayerError> {
        validate_epoch_delay(epoch_delay)?;
        validate_max_roots_size(max_roots_size)?;

        Ok(Self {
            prev_epoch: 0,
            curr_epoch: 0,
            epoch_delay,
            message_collect_end_time: 0,
            next_voting_time: 0,
            max_roots_size,
        })
    }

    /// Opens a new epoch at `now` for a root covering messages collected until
    /// `message_collect_end_time`.
    pub fn advance(
        &mut self,
        now: i64,
        message_collect_end_time: i64,
    ) -> std::result::Result<(), RelayLayerError> {
        if message_collect_end_time < self.message_collect_end_time {
            return Err(RelayLayerError::MessageCollectEndTimeTooLow);
        }
        if now < self.next_voting_time || now <= self.curr_epoch {
            return Err(RelayLayerError::VotingNotActive);
        }

        let next_voting_time = now
            .checked_add(self.epoch_delay)
            .ok_or(RelayLayerError::ArithmeticOverflow)?;

        self.prev_epoch = self.curr_epoch;
        self.curr_epoch = now;
        self.message_collect_end_time = message_collect_end_time;
        self.next_voting_time = next_voting_time;

        Ok(())
    }

    /// Roots whose `valid_timestamp` is at or before this instant are evicted.
    pub fn eviction_threshold(&self) -> i64 {
        self.curr_epoch
            .saturating_sub(self.epoch_delay.saturating_mul(self.max_roots_size as i64))
    }

    pub fn set_epoch_delay(
        &mut self,
        epoch_delay: i64,
    ) -> std::result::Result<(), RelayLayerError> {
        validate_epoch_delay(epoch_delay)?;
        self.epoch_delay = epoch_delay;
        Ok(())
    }
}

fn validate_epoch_delay(epoch_delay: i64) -> std::result::Result<(), RelayLayerError> {
    if epoch_delay < 0 {
        return Err(RelayLayerError::InvalidEpochDelay);
    }
    Ok(())
}

fn validate_max_roots_size(max_roots_size: u8) -> std::result::Result<(), RelayLayerError> {
    if max_roots_size == 0 || max_roots_size > MAX_ROOTS_CAPACITY {
        return Err(RelayLayerError::InvalidMaxRootsSize);
    }
    Ok(())
}
