//! OAuth callback handling
//!
//! Decodes the redirect parameters once, drives the exchange, and returns
//! the cleaned URL the dashboard should display. Handling the cleaned URL
//! again is a no-op, so a page refresh can never replay a spent code.

use tracing::{info, warn};
use url::Url;

use creatorpulse_core::{strip_oauth_params, CallbackOutcome};

use crate::backend::BackendClient;
use crate::session::Session;

/// What callback handling did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackHandled {
    /// Not a callback URL; render from whatever session is already stored.
    NotCallback,

    /// Login completed; the session now holds a fresh token.
    LoggedIn,

    /// Authorization or exchange failed; the message is user-displayable.
    LoginFailed { message: String },
}

/// Handle a page-load URL.
///
/// Always returns the cleaned URL (callback parameters stripped) alongside
/// the outcome. A failed exchange is terminal for the code: the caller must
/// restart login rather than retry.
pub async fn handle_callback(
    url: &Url,
    session: &Session,
    backend: &BackendClient,
    redirect_uri: &str,
) -> (Url, CallbackHandled) {
    let cleaned = strip_oauth_params(url);

    let handled = match CallbackOutcome::from_url(url) {
        CallbackOutcome::None => CallbackHandled::NotCallback,

        CallbackOutcome::Error { error, description } => {
            let message = match description {
                Some(description) => description,
                None => error.clone(),
            };
            warn!("Login rejected at provider: {} ({})", error, message);
            CallbackHandled::LoginFailed {
                message: format!("Login failed: {}", message),
            }
        }

        CallbackOutcome::Code(code) => match backend.exchange_code(&code, redirect_uri).await {
            Ok(grant) => {
                match session
                    .store_login(&grant.access_token, grant.user_id.as_ref())
                    .await
                {
                    Ok(()) => {
                        info!("Login successful");
                        CallbackHandled::LoggedIn
                    }
                    Err(e) => {
                        warn!("Failed to persist session: {}", e);
                        CallbackHandled::LoginFailed {
                            message: format!("Failed to complete login: {}", e),
                        }
                    }
                }
            }
            Err(e) => {
                warn!("Code exchange failed: {}", e);
                CallbackHandled::LoginFailed {
                    message: format!("Failed to complete login: {}", e),
                }
            }
        },
    };

    (cleaned, handled)
}
