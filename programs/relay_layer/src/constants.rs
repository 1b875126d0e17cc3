use anchor_lang::prelude::*;

// Seeds

#[constant]
pub const RELAY_LAYER_SEED: &[u8] = b"relay_layer";

#[constant]
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";

/// Seed of accounts created on delivery from an entry's `state_init`.
#[constant]
pub const DEPLOYED_ACCOUNT_SEED: &[u8] = b"deployed";

// Root store

/// Hard upper bound on `max_roots_size`; sizes the `RelayLayer` account.
#[constant]
pub const MAX_ROOTS_CAPACITY: u8 = 16;

// Operation types carried by outbound messages to TAC. Any other value is
// forwarded unchanged.

#[constant]
pub const SOL_TRANSFER: u32 = 0x4ad6_7cd3;

#[constant]
pub const TOKEN_TRANSFER: u32 = 0x2906_ab02;

#[constant]
pub const NFT_TRANSFER: u32 = 0x8b09_2962;

#[constant]
pub const TOKEN_BURN: u32 = 0xb0af_a74d;

#[constant]
pub const NFT_BURN: u32 = 0xbcd1_9310;
