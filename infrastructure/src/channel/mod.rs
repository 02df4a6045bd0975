//! Channel adapters implementing the [`MessageChannel`](huddle_application::MessageChannel) port.

mod memory;

pub use memory::{InMemoryChannel, OutboundMessage};
