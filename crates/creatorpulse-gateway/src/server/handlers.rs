//! HTTP handlers for the gateway server

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::provider::{ExchangeError, ProviderClient};
use crate::settings::GatewaySettings;

/// App State shared by all handlers. Settings are immutable after startup;
/// the provider client clones cheaply (shared connection pool).
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<GatewaySettings>,
    pub provider: ProviderClient,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    debug!("[Gateway] Health check");
    Json(HealthResponse {
        status: "CreatorPulse OAuth gateway running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Query parameters the provider may attach to the OAuth redirect
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_reason: Option<String>,
    pub error_description: Option<String>,
}

/// Browser-facing OAuth callback.
///
/// The provider redirects here after the consent step. Whatever happens, the
/// user ends up back on the dashboard: with `token`/`user_id` in the query
/// string on success, or `error`/`error_description` on failure.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    if let Some(error) = &params.error {
        warn!(
            "[Gateway] OAuth callback error from provider: {} (reason: {}, description: {})",
            error,
            params.error_reason.as_deref().unwrap_or("-"),
            params.error_description.as_deref().unwrap_or("-"),
        );
        return error_redirect(
            &state.settings.frontend_url,
            error,
            params.error_description.as_deref().unwrap_or(error),
        );
    }

    let Some(code) = params.code.filter(|code| !code.is_empty()) else {
        warn!("[Gateway] OAuth callback without authorization code");
        return error_redirect(
            &state.settings.frontend_url,
            "no_code",
            "No authorization code received",
        );
    };

    match state
        .provider
        .exchange_code(&code, &state.settings.redirect_uri())
        .await
    {
        Ok(grant) => {
            let user_id = grant.user_id.map(|id| id.to_string()).unwrap_or_default();
            let url = format!(
                "{}?token={}&user_id={}",
                state.settings.frontend_url,
                urlencoding::encode(&grant.access_token),
                urlencoding::encode(&user_id),
            );
            Redirect::temporary(&url)
        }
        Err(ExchangeError::Provider(message)) => {
            error_redirect(&state.settings.frontend_url, "token_exchange_failed", &message)
        }
        Err(ExchangeError::Transport(e)) => {
            error!("[Gateway] Exception during callback exchange: {}", e);
            error_redirect(
                &state.settings.frontend_url,
                "exception",
                "Token exchange failed",
            )
        }
    }
}

fn error_redirect(frontend_url: &str, error: &str, description: &str) -> Redirect {
    let url = format!(
        "{}?error={}&error_description={}",
        frontend_url,
        urlencoding::encode(error),
        urlencoding::encode(description),
    );
    Redirect::temporary(&url)
}

/// Exchange request body from the dashboard
#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    #[serde(default)]
    pub code: Option<String>,

    /// When present, forwarded to the provider verbatim so it matches the
    /// authorization request byte-for-byte (trailing slash included).
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// Token exchange endpoint.
///
/// Validates input before any provider call; a missing code never leaves
/// the gateway. Exchange failures are terminal: the code is spent either
/// way and the caller must restart login.
pub async fn exchange_token(
    State(state): State<AppState>,
    Json(body): Json<ExchangeRequest>,
) -> Response {
    let Some(code) = body.code.filter(|code| !code.is_empty()) else {
        warn!("[Gateway] Exchange request without authorization code");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Authorization code is required" })),
        )
            .into_response();
    };

    let redirect_uri = body
        .redirect_uri
        .unwrap_or_else(|| state.settings.redirect_uri());

    match state.provider.exchange_code(&code, &redirect_uri).await {
        // TokenGrant serializes to exactly {access_token, user_id}; no other
        // provider fields cross back to the browser side.
        Ok(grant) => Json(grant).into_response(),
        Err(ExchangeError::Provider(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response(),
        Err(ExchangeError::Transport(e)) => {
            error!("[Gateway] Exception during token exchange: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to exchange token",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Long-lived token request body
#[derive(Debug, Deserialize)]
pub struct LongLivedRequest {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// Long-lived token upgrade endpoint.
pub async fn long_lived_token(
    State(state): State<AppState>,
    Json(body): Json<LongLivedRequest>,
) -> Response {
    let Some(access_token) = body.access_token.filter(|token| !token.is_empty()) else {
        warn!("[Gateway] Long-lived token request without access token");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Access token is required" })),
        )
            .into_response();
    };

    match state.provider.long_lived_token(&access_token).await {
        Ok(grant) => Json(grant).into_response(),
        Err(ExchangeError::Provider(message)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": message })),
        )
            .into_response(),
        Err(ExchangeError::Transport(e)) => {
            error!("[Gateway] Long-lived token exchange failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to get long-lived token" })),
            )
                .into_response()
        }
    }
}
