//! Gateway configuration
//!
//! Immutable settings constructed once at process start and shared by
//! reference with the handlers. The app secret stays server-side and is
//! redacted from `Debug` output.

use anyhow::Context as _;
use std::fmt;

/// Path on the gateway where the provider redirects after consent.
pub const OAUTH_CALLBACK_PATH: &str = "/oauth/callback";

/// Static gateway configuration. Never mutated after startup.
#[derive(Clone)]
pub struct GatewaySettings {
    /// Provider app identifier (public)
    pub app_id: String,

    /// Provider app secret; never appears in any response body or log line
    pub app_secret: String,

    /// Public base URL of this gateway, where the provider redirects
    pub backend_url: String,

    /// Dashboard URL users are sent back to after the callback
    pub frontend_url: String,
}

impl GatewaySettings {
    /// Load settings from the environment.
    ///
    /// `CREATORPULSE_APP_ID` and `CREATORPULSE_APP_SECRET` are required;
    /// the URLs default to local development values.
    pub fn from_env() -> anyhow::Result<Self> {
        let app_id = std::env::var("CREATORPULSE_APP_ID")
            .context("missing required environment variable CREATORPULSE_APP_ID")?;
        let app_secret = std::env::var("CREATORPULSE_APP_SECRET")
            .context("missing required environment variable CREATORPULSE_APP_SECRET")?;

        let backend_url = std::env::var("CREATORPULSE_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let frontend_url = std::env::var("CREATORPULSE_FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Ok(Self::new(app_id, app_secret, backend_url, frontend_url))
    }

    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        backend_url: impl Into<String>,
        frontend_url: impl Into<String>,
    ) -> Self {
        // Canonicalize the base URL once here; redirect_uri() must compose
        // the exact string registered with the provider.
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            backend_url,
            frontend_url: frontend_url.into(),
        }
    }

    /// Default redirect URI for the exchange: the callback endpoint on this
    /// gateway. Must be byte-identical to the provider app registration.
    pub fn redirect_uri(&self) -> String {
        format!("{}{}", self.backend_url, OAUTH_CALLBACK_PATH)
    }
}

impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("app_id", &self.app_id)
            .field("app_secret", &"[REDACTED]")
            .field("backend_url", &self.backend_url)
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}
