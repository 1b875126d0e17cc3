pub mod dispatch;
pub use dispatch::*;

pub mod vault;
pub use vault::*;
