//! Provider token endpoint client
//!
//! Performs the secret-bearing exchanges with the identity provider: the
//! authorization-code exchange and the long-lived token upgrade. Only this
//! module ever sends the app secret over the wire.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

use creatorpulse_core::{LongLivedGrant, ProviderEndpoints, TokenGrant, UserId};

/// Errors from the secret-bearing provider calls.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The provider rejected the request and said why. Surfaced to the
    /// caller with the provider's own message.
    #[error("{0}")]
    Provider(String),

    /// Network or decoding failure below the provider protocol.
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Raw code-exchange response. The provider signals rejection in-band with
/// `error_message` rather than relying on the status code alone.
#[derive(Debug, Deserialize)]
struct ExchangeResponse {
    access_token: Option<String>,
    user_id: Option<UserId>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

/// Long-lived upgrade response; errors come wrapped in an `error` object.
#[derive(Debug, Deserialize)]
struct LongLivedResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<i64>,
    error: Option<GraphError>,
}

/// Client for the provider's token endpoints.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
    endpoints: ProviderEndpoints,
    app_id: String,
    app_secret: String,
}

impl ProviderClient {
    pub fn new(
        endpoints: ProviderEndpoints,
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("CreatorPulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoints,
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Exchange an authorization code for an access token.
    ///
    /// One attempt only: codes are single-use, so a failed exchange is
    /// terminal and the caller must restart login. The redirect URI is sent
    /// exactly as given; the provider compares it byte-for-byte against the
    /// one used during authorization.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, ExchangeError> {
        info!(
            "[Gateway] Exchanging authorization code (redirect_uri: {})",
            redirect_uri
        );

        let params = [
            ("client_id", self.app_id.as_str()),
            ("client_secret", self.app_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ];

        // Parse the body regardless of status: rejections arrive as a 400
        // with `error_message` set.
        let response: ExchangeResponse = self
            .http
            .post(&self.endpoints.token_url)
            .form(&params)
            .send()
            .await?
            .json()
            .await?;

        if let Some(message) = response.error_message {
            error!("[Gateway] Token exchange rejected by provider: {}", message);
            return Err(ExchangeError::Provider(message));
        }

        match response.access_token {
            Some(access_token) => {
                info!("[Gateway] Token exchange successful");
                Ok(TokenGrant {
                    access_token,
                    user_id: response.user_id,
                })
            }
            None => Err(ExchangeError::Provider(
                "Token exchange completed but no token received".to_string(),
            )),
        }
    }

    /// Upgrade a short-lived access token to a long-lived one.
    ///
    /// Independent of the code exchange; callable whenever the caller holds
    /// a valid short-lived token.
    pub async fn long_lived_token(
        &self,
        access_token: &str,
    ) -> Result<LongLivedGrant, ExchangeError> {
        info!("[Gateway] Requesting long-lived token upgrade");

        let response: LongLivedResponse = self
            .http
            .get(self.endpoints.graph_root("access_token"))
            .query(&[
                ("grant_type", "ig_exchange_token"),
                ("client_secret", self.app_secret.as_str()),
                ("access_token", access_token),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            error!(
                "[Gateway] Long-lived token upgrade rejected: {}",
                error.message
            );
            return Err(ExchangeError::Provider(error.message));
        }

        match response.access_token {
            Some(access_token) => Ok(LongLivedGrant {
                access_token,
                token_type: response.token_type.unwrap_or_else(|| "bearer".to_string()),
                expires_in: response.expires_in.unwrap_or(0),
            }),
            None => Err(ExchangeError::Provider(
                "Token upgrade completed but no token received".to_string(),
            )),
        }
    }
}
