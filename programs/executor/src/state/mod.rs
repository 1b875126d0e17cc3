pub mod executor;
pub use executor::*;

pub mod payload_buffer;
pub use payload_buffer::*;
