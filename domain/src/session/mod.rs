//! Session state and final artifact

pub mod artifact;
pub mod state;

pub use artifact::SessionArtifact;
pub use state::SessionState;
