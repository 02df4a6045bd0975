//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod channel;
pub mod planner;
pub mod progress;
pub mod session_logger;
pub mod token_exchange;
