//! Connection quorum domain: authorization records and wait outcomes

pub mod outcome;
pub mod record;

pub use outcome::{QuorumOutcome, QuorumWait};
pub use record::{ClaimedIdentity, ConnectionRecord, ConnectionState, Credential};
