use common::Message;

use crate::{
    error::RelayLayerError,
    state::{FeeData, FeeLedger, ProcessingCosts},
};

/// How the value of a verified inbound batch is split.
///
/// Built before any lamport moves, so a batch that cannot be covered is
/// rejected without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundPlan {
    /// Paid to destinations by the relayer.
    pub attached_payout: u64,
    /// Paid to destinations out of the vault.
    pub unlocked_payout: u64,
    /// Executor fee paid out of the vault, zero for token fees.
    pub native_executor_fee: u64,
    pub protocol_fee: u64,
    pub processing_cost: u64,
    /// Part of the attached value left over after dispatch.
    pub excess: u64,
}

impl InboundPlan {
    pub fn new(
        message: &Message,
        msg_value: u64,
        fees: &FeeLedger,
        costs: &ProcessingCosts,
    ) -> Result<Self, RelayLayerError> {
        let attached_payout = message
            .attached_value()
            .ok_or(RelayLayerError::ArithmeticOverflow)?;
        let unlocked_payout = message
            .unlocked_value()
            .ok_or(RelayLayerError::ArithmeticOverflow)?;
        let native_executor_fee = match message.executor_fee_token {
            Some(_) => 0,
            None => message.executor_fee_value,
        };
        let protocol_fee = fees.sol_protocol_fee;
        let processing_cost = costs.inbound(message.entries.len())?;

        let required = attached_payout
            .checked_add(protocol_fee)
            .and_then(|required| required.checked_add(processing_cost))
            .ok_or(RelayLayerError::ArithmeticOverflow)?;
        let excess = msg_value
            .checked_sub(required)
            .ok_or(RelayLayerError::NotEnoughSol)?;

        Ok(Self {
            attached_payout,
            unlocked_payout,
            native_executor_fee,
            protocol_fee,
            processing_cost,
            excess,
        })
    }

    /// Lamports moved from the relayer into the vault.
    pub fn vault_deposit(&self) -> u64 {
        // Both terms are bounded by `msg_value`.
        self.protocol_fee + self.processing_cost
    }

    /// Lamports the relayer parts with, excess excluded.
    pub fn relayer_spend(&self) -> u64 {
        self.attached_payout + self.vault_deposit()
    }

    /// Checks that the vault can cover unlocks and the native executor fee
    /// from the part of its balance not owed to anyone.
    pub fn check_reserve(&self, available: u64) -> Result<(), RelayLayerError> {
        let reserve_required = self
            .unlocked_payout
            .checked_add(self.native_executor_fee)
            .ok_or(RelayLayerError::ArithmeticOverflow)?;

        if reserve_required > available {
            return Err(RelayLayerError::InsufficientBalance);
        }
        Ok(())
    }
}

/// How the value attached to an outbound message is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutboundPlan {
    pub protocol_fee: u64,
    /// Moved into the vault, protocol fee included.
    pub vault_deposit: u64,
    pub excess: u64,
}

impl OutboundPlan {
    pub fn new(
        cross_chain_amount: u64,
        fee_data: Option<&FeeData>,
        msg_value: u64,
        fees: &FeeLedger,
        costs: &ProcessingCosts,
    ) -> Result<Self, RelayLayerError> {
        let (protocol_fee, declared_fees) = match fee_data {
            Some(fee_data) => {
                if fee_data.protocol_fee < fees.outbound_protocol_fee(fee_data.is_round_trip)? {
                    return Err(RelayLayerError::NotEnoughProtocolFee);
                }
                (fee_data.protocol_fee, fee_data.total()?)
            }
            None => (0, 0),
        };

        let vault_deposit = cross_chain_amount
            .checked_add(declared_fees)
            .and_then(|deposit| deposit.checked_add(costs.outbound()))
            .ok_or(RelayLayerError::ArithmeticOverflow)?;
        let excess = msg_value
            .checked_sub(vault_deposit)
            .ok_or(RelayLayerError::NotEnoughSol)?;

        Ok(Self {
            protocol_fee,
            vault_deposit,
            excess,
        })
    }
}
