//! Authorization adapters implementing the [`TokenExchange`](huddle_application::TokenExchange) port.

mod http_exchange;
mod offline;

pub use http_exchange::HttpTokenExchange;
pub use offline::OfflineTokenExchange;
