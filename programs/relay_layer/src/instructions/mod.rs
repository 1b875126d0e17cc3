pub mod admin;
pub use admin::*;

pub mod fees;
pub use fees::*;

pub mod initialize;
pub use initialize::*;

pub mod solana_to_tac;
pub use solana_to_tac::*;

pub mod tac_to_solana;
pub use tac_to_solana::*;

pub mod views;
pub use views::*;
