pub mod executor;
pub mod merkle;
pub mod message;

pub use executor::*;
pub use merkle::*;
pub use message::*;
