//! OAuth2 authorization-code exchange over HTTP.
//!
//! Posts the standard `grant_type=authorization_code` form to the provider's
//! token endpoint. Providers that answer `200 {"ok": false, "error": ..}`
//! (Slack style) are treated as rejections, and a user token nested under
//! `authed_user` is accepted when there is no top-level one.

use async_trait::async_trait;
use huddle_application::ports::token_exchange::{AuthorizationError, TokenExchange};
use huddle_domain::Credential;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    ok: Option<bool>,
    error: Option<String>,
    error_description: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    scope: Option<String>,
    authed_user: Option<Box<TokenResponse>>,
}

impl TokenResponse {
    fn into_credential(self) -> Result<Credential, AuthorizationError> {
        if self.ok == Some(false) || self.error.is_some() {
            let reason = self
                .error_description
                .or(self.error)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(AuthorizationError::Rejected(reason));
        }

        match (self.access_token, self.authed_user) {
            (Some(access_token), _) => Ok(Credential {
                access_token,
                refresh_token: self.refresh_token,
                expires_in: self.expires_in,
                scope: self.scope,
            }),
            (None, Some(user)) => user.into_credential(),
            (None, None) => Err(AuthorizationError::InvalidResponse(
                "no access_token in response".to_string(),
            )),
        }
    }
}

/// Parse a token endpoint body into a credential
fn credential_from_body(body: &str) -> Result<Credential, AuthorizationError> {
    serde_json::from_str::<TokenResponse>(body)
        .map_err(|e| AuthorizationError::InvalidResponse(e.to_string()))?
        .into_credential()
}

pub struct HttpTokenExchange {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: Option<String>,
}

impl HttpTokenExchange {
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: None,
        }
    }

    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange(&self, code: &str) -> Result<Credential, AuthorizationError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];
        if let Some(uri) = &self.redirect_uri {
            form.push(("redirect_uri", uri.as_str()));
        }

        debug!("Exchanging authorization code at {}", self.token_url);
        let response = self
            .client
            .post(&self.token_url)
            .timeout(REQUEST_TIMEOUT)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthorizationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthorizationError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(match credential_from_body(&body) {
                Err(AuthorizationError::Rejected(reason)) => AuthorizationError::Rejected(reason),
                _ => AuthorizationError::Rejected(format!("HTTP {}", status)),
            });
        }

        credential_from_body(&body)
    }
}
