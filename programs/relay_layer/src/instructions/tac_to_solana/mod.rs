pub mod error_notification;
pub use error_notification::*;

pub mod executor_forward;
pub use executor_forward::*;

pub mod update_merkle_root;
pub use update_merkle_root::*;
