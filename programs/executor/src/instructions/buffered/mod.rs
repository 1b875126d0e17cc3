pub mod append_to_payload_buffer;
pub mod close_payload_buffer;
pub mod deploy_buffered;
pub mod initialize_payload_buffer;
pub mod proxy_message_buffered;

pub use append_to_payload_buffer::*;
pub use close_payload_buffer::*;
pub use deploy_buffered::*;
pub use initialize_payload_buffer::*;
pub use proxy_message_buffered::*;
