//! Authorization provider configuration from TOML (`[auth]` section)

use serde::{Deserialize, Serialize};

/// OAuth2 client settings used by the token exchange
///
/// `client_secret` is usually supplied through `HUDDLE_AUTH__CLIENT_SECRET`
/// rather than written to a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    pub token_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
}

impl FileAuthConfig {
    /// Whether enough is configured to exchange codes over HTTP
    pub fn is_configured(&self) -> bool {
        self.token_url.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }
}
