//! Token exchange for sessions without an authorization provider.
//!
//! Any non-blank code is accepted and turned into a local credential, so the
//! connection gate can be exercised from the console driver.

use async_trait::async_trait;
use huddle_application::ports::token_exchange::{AuthorizationError, TokenExchange};
use huddle_domain::Credential;

pub struct OfflineTokenExchange;

#[async_trait]
impl TokenExchange for OfflineTokenExchange {
    async fn exchange(&self, code: &str) -> Result<Credential, AuthorizationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthorizationError::Rejected("empty code".to_string()));
        }
        let mut credential = Credential::new(format!("offline-{}", code));
        credential.scope = Some("offline".to_string());
        Ok(credential)
    }
}
