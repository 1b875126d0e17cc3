pub mod buffered;
pub use buffered::*;

pub mod deploy;
pub use deploy::*;

pub mod proxy_message;
pub use proxy_message::*;

pub mod views;
pub use views::*;
