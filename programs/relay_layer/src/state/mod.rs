pub mod epoch;
pub use epoch::*;

pub mod fee_ledger;
pub use fee_ledger::*;

pub mod relay_layer;
pub use relay_layer::*;

pub mod root_store;
pub use root_store::*;
