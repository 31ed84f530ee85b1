//! Client for the token-exchange gateway
//!
//! The dashboard never talks to the provider's token endpoint itself: the
//! authorization code goes to the gateway, which holds the app secret.

use serde::Deserialize;
use std::time::Duration;
use tracing::info;

use creatorpulse_core::{ApiError, LongLivedGrant, TokenGrant};

/// Gateway responses carry either the payload or an `error` field. The
/// error variant must be tried first: success shapes never have `error`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendResponse<T> {
    Err { error: String },
    Ok(T),
}

/// Client for the gateway's exchange endpoints.
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("CreatorPulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange an authorization code for an access token via the gateway.
    ///
    /// The redirect URI rides along so the gateway forwards the exact string
    /// used during authorization.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<TokenGrant, ApiError> {
        info!("Exchanging authorization code via gateway");

        let response: BackendResponse<TokenGrant> = self
            .http
            .post(format!("{}/exchange-token", self.base_url))
            .json(&serde_json::json!({
                "code": code,
                "redirect_uri": redirect_uri,
            }))
            .send()
            .await?
            .json()
            .await?;

        match response {
            BackendResponse::Ok(grant) => Ok(grant),
            BackendResponse::Err { error } => Err(ApiError::provider(error, None)),
        }
    }

    /// Upgrade the stored short-lived token via the gateway.
    pub async fn long_lived_token(&self, access_token: &str) -> Result<LongLivedGrant, ApiError> {
        info!("Requesting long-lived token via gateway");

        let response: BackendResponse<LongLivedGrant> = self
            .http
            .post(format!("{}/get-long-lived-token", self.base_url))
            .json(&serde_json::json!({ "access_token": access_token }))
            .send()
            .await?
            .json()
            .await?;

        match response {
            BackendResponse::Ok(grant) => Ok(grant),
            BackendResponse::Err { error } => Err(ApiError::provider(error, None)),
        }
    }
}
