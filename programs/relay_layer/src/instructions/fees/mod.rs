pub mod add_protocol_fee;
pub use add_protocol_fee::*;

pub mod collect_protocol_fee;
pub use collect_protocol_fee::*;
