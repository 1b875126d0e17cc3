use anchor_lang::prelude::*;
use common::Message;

/// Holds one attested batch until a relayer delivers it.
///
/// The address is derived from the batch hash, so each batch has exactly one
/// Executor. `is_spent` makes delivery at-most-once; it is cleared again when the
/// relay layer rejects the batch so that it can be retried.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Executor {
    pub relay_layer: Pubkey,
    pub message_hash: [u8; 32],
    pub bump: u8,
    pub is_spent: bool,
    /// Relayer of the last successful delivery.
    pub last_executor: Option<Pubkey>,
    pub payload: Message,
}

impl Executor {
    pub fn space(payload: &Message) -> usize {
        Self::space_for_payload_len(payload.space())
    }

    /// Space for a batch whose encoding takes `payload_len` bytes.
    pub fn space_for_payload_len(payload_len: usize) -> usize {
        32 + 32 + 1 + 1 + (1 + 32) + payload_len
    }
}
