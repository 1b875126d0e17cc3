use anchor_lang::prelude::*;

use crate::error::RelayLayerError;

/// Protocol fee rates and the supply owed to the attester.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct FeeLedger {
    /// Fee charged for the TAC leg of a message, in lamports.
    pub tac_protocol_fee: u64,
    /// Fee charged for the Solana leg of a message, in lamports.
    pub sol_protocol_fee: u64,
    /// Lamports held in the vault on behalf of the attester.
    pub protocol_fee_supply: u64,
}

impl FeeLedger {
    pub fn new(tac_protocol_fee: u64, sol_protocol_fee: u64) -> Self {
        Self {
            tac_protocol_fee,
            sol_protocol_fee,
            protocol_fee_supply: 0,
        }
    }

    /// Minimum protocol fee an outbound message must declare.
    pub fn outbound_protocol_fee(
        &self,
        is_round_trip: bool,
    ) -> std::result::Result<u64, RelayLayerError> {
        if !is_round_trip {
            return Ok(self.tac_protocol_fee);
        }
        self.tac_protocol_fee
            .checked_add(self.sol_protocol_fee)
            .ok_or(RelayLayerError::ArithmeticOverflow)
    }

    pub fn accrue(&mut self, amount: u64) -> std::result::Result<(), RelayLayerError> {
        self.protocol_fee_supply = self
            .protocol_fee_supply
            .checked_add(amount)
            .ok_or(RelayLayerError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Empties the supply and returns the collected amount.
    pub fn collect(&mut self) -> std::result::Result<u64, RelayLayerError> {
        if self.protocol_fee_supply == 0 {
            return Err(RelayLayerError::ZeroFeeSupply);
        }
        Ok(std::mem::take(&mut self.protocol_fee_supply))
    }
}

/// Lamports retained by the vault to cover processing, replacing gas and
/// storage estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AnchorSerialize, AnchorDeserialize, InitSpace)]
pub struct ProcessingCosts {
    /// Charged once per outbound message and once per inbound batch.
    pub message_base: u64,
    /// Charged per inbound entry.
    pub per_entry: u64,
    /// Withheld from every `add_protocol_fee` deposit.
    pub fee_deposit: u64,
}

impl ProcessingCosts {
    pub fn inbound(&self, entries: usize) -> std::result::Result<u64, RelayLayerError> {
        self.per_entry
            .checked_mul(entries as u64)
            .and_then(|cost| cost.checked_add(self.message_base))
            .ok_or(RelayLayerError::ArithmeticOverflow)
    }

    pub fn outbound(&self) -> u64 {
        self.message_base
    }
}

/// Fee components an outbound message declares and pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub struct FeeData {
    /// Whether the TAC side answers with a message back to Solana.
    pub is_round_trip: bool,
    pub protocol_fee: u64,
    /// Paid to the TAC executor relaying the message.
    pub tac_executor_fee: u64,
    /// Paid to the Solana executor relaying the answer of a round trip.
    pub sol_executor_fee: u64,
}

impl FeeData {
    pub fn total(&self) -> std::result::Result<u64, RelayLayerError> {
        self.protocol_fee
            .checked_add(self.tac_executor_fee)
            .and_then(|total| total.checked_add(self.sol_executor_fee))
            .ok_or(RelayLayerError::ArithmeticOverflow)
    }
}
