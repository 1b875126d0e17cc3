pub mod deploy;
pub mod proxy;

pub use deploy::*;
pub use proxy::*;
