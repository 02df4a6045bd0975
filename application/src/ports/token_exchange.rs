//! Token exchange port for the authorization handshake
//!
//! The authorization web surface (participant picker, start endpoint,
//! callback endpoint) lives outside the core. Its callback hands the core a
//! `(claimed identity, code)` pair; the core's only job is to trade the code
//! for a credential through this port.

use async_trait::async_trait;
use huddle_domain::Credential;
use thiserror::Error;

/// Errors that can occur while exchanging an authorization code
#[derive(Error, Debug)]
pub enum AuthorizationError {
    #[error("Authorization provider rejected the code: {0}")]
    Rejected(String),

    #[error("Token endpoint unreachable: {0}")]
    Transport(String),

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Trade an authorization code for a credential
    async fn exchange(&self, code: &str) -> Result<Credential, AuthorizationError>;
}
