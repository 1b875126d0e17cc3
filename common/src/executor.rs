use anchor_lang::prelude::*;

pub const EXECUTOR_SEED: &[u8] = b"executor";

/// Address of the Executor responsible for the message hashed to `message_hash`.
///
/// The address is a PDA of the executor program, so only that program can sign
/// for it, and it is unique per `(relay_layer, message_hash)` pair.
pub fn executor_address(
    executor_program: &Pubkey,
    relay_layer: &Pubkey,
    message_hash: &[u8; 32],
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[EXECUTOR_SEED, relay_layer.as_ref(), message_hash.as_ref()],
        executor_program,
    )
}
