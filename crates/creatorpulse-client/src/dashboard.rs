//! Authenticated data-fetch sequence
//!
//! Identity, profile, then metrics, strictly in that order, since both
//! later calls need the account id resolved by the first. An expired
//! session at any step clears the stored token and aborts the remainder;
//! nothing is retried.

use std::collections::HashMap;
use tracing::{info, warn};
use url::Url;

use creatorpulse_core::{aggregate, ApiError, Profile};

use crate::backend::BackendClient;
use crate::callback::{handle_callback, CallbackHandled};
use crate::graph::GraphClient;
use crate::session::Session;

/// Everything the dashboard renders after a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub profile: Profile,

    /// Aggregated per-metric figures over the insights window
    pub insights: HashMap<String, i64>,
}

/// Where a page load ends up.
#[derive(Debug)]
pub enum PageLoad {
    /// No session; show the connect button.
    LoggedOut,

    /// Login failed at the provider or during exchange.
    LoginFailed { message: String },

    /// Logged in and the first fetch succeeded.
    Ready(DashboardData),

    /// Logged in but the fetch failed. On an expired session the stored
    /// token is already cleared by the time this is returned.
    FetchFailed { error: ApiError },
}

/// Full page-load flow: handle any OAuth callback in the URL, then run the
/// first data fetch automatically when a session is present.
///
/// Returns the cleaned URL the dashboard should display alongside the
/// outcome.
pub async fn page_load(
    url: &Url,
    session: &Session,
    backend: &BackendClient,
    graph: &GraphClient,
    redirect_uri: &str,
) -> (Url, PageLoad) {
    let (cleaned, handled) = handle_callback(url, session, backend, redirect_uri).await;

    let outcome = match handled {
        CallbackHandled::LoginFailed { message } => PageLoad::LoginFailed { message },
        CallbackHandled::LoggedIn | CallbackHandled::NotCallback => {
            if session.is_logged_in().await {
                match fetch_dashboard(session, graph).await {
                    Ok(data) => PageLoad::Ready(data),
                    Err(error) => PageLoad::FetchFailed { error },
                }
            } else {
                PageLoad::LoggedOut
            }
        }
    };

    (cleaned, outcome)
}

/// Run the three-step fetch against the stored session.
///
/// On [`ApiError::SessionExpired`] the session is cleared before the error
/// propagates, forcing the UI back to its logged-out state.
pub async fn fetch_dashboard(
    session: &Session,
    graph: &GraphClient,
) -> Result<DashboardData, ApiError> {
    let access_token = match session.access_token().await {
        Ok(Some(token)) => token,
        Ok(None) => {
            return Err(ApiError::validation(
                "No access token found. Please login first.",
            ))
        }
        Err(e) => {
            warn!("Session store unavailable: {}", e);
            return Err(ApiError::validation(
                "No access token found. Please login first.",
            ));
        }
    };

    let result = fetch_with_token(&access_token, session, graph).await;

    if let Err(error) = &result {
        if error.is_session_expired() {
            warn!("Access token rejected; clearing stored session");
            if let Err(store_err) = session.clear().await {
                warn!("Failed to clear session: {}", store_err);
            }
        }
    }

    result
}

async fn fetch_with_token(
    access_token: &str,
    session: &Session,
    graph: &GraphClient,
) -> Result<DashboardData, ApiError> {
    info!("Fetching dashboard data");

    let identity = graph.me(access_token).await?;
    // Keep the resolved id around for the next page load
    if let Err(e) = session.store_user_id(&identity.id).await {
        warn!("Failed to persist user id: {}", e);
    }

    let profile = graph.profile(access_token, &identity.id).await?;
    let series = graph.insights(access_token, &identity.id).await?;

    info!(
        "Dashboard fetch complete: @{}, {} metric series",
        profile.username,
        series.len()
    );

    Ok(DashboardData {
        profile,
        insights: aggregate(&series),
    })
}
