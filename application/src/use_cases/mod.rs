//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod collect_responses;
pub mod confirm;
pub mod connection_quorum;
pub mod run_session;

#[cfg(test)]
pub(crate) mod test_support;
