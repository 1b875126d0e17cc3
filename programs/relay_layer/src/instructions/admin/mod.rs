use anchor_lang::prelude::*;

use crate::{constants::RELAY_LAYER_SEED, error::RelayLayerError, state::RelayLayer};

pub mod change_admin;
pub use change_admin::*;

pub mod change_attester;
pub use change_attester::*;

pub mod parameters;
pub use parameters::*;

pub mod update_code;
pub use update_code::*;

pub mod update_executor_code;
pub use update_executor_code::*;

/// Accounts struct for admin-only instructions.
#[derive(Accounts)]
pub struct AdminOnly<'info> {
    /// The relay layer account holding the governed configuration
    #[account(
        mut,
        has_one = admin @ RelayLayerError::NotFromAdmin,
        seeds = [RELAY_LAYER_SEED],
        bump
    )]
    pub relay_layer: Account<'info, RelayLayer>,

    /// The current admin
    pub admin: Signer<'info>,
}
