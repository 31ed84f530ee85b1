//! Authenticated data API client
//!
//! Calls the provider's Graph API with the bearer token as a query
//! parameter. An `error.code` of 190 in any payload means the token is
//! invalid or expired and maps to [`ApiError::SessionExpired`].

use chrono::Utc;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use creatorpulse_core::{
    ApiError, Identity, MetricSeries, Profile, ProviderEndpoints, ERROR_CODE_TOKEN_EXPIRED,
};

/// Profile fields requested for the dashboard header.
const PROFILE_FIELDS: &str =
    "id,username,name,profile_picture_url,followers_count,follows_count,media_count";

/// Account-level metrics fetched for the insights grid.
const INSIGHT_METRICS: &str =
    "reach,profile_views,accounts_engaged,total_interactions,website_clicks,follower_count";

/// Days of history requested from the insights endpoint.
const INSIGHTS_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
    message: String,
    code: Option<i64>,
}

/// Payload-or-error decoding. The error variant must come first: an error
/// body would also satisfy shapes whose fields all have defaults.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GraphResponse<T> {
    Err(GraphErrorBody),
    Ok(T),
}

#[derive(Debug, Deserialize)]
struct InsightsEnvelope {
    #[serde(default)]
    data: Vec<MetricSeries>,
}

/// Client for the provider's data API.
pub struct GraphClient {
    endpoints: ProviderEndpoints,
    http: reqwest::Client,
}

impl GraphClient {
    pub fn new(endpoints: ProviderEndpoints) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("CreatorPulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { endpoints, http }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response: GraphResponse<T> = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .json()
            .await?;

        match response {
            GraphResponse::Ok(payload) => Ok(payload),
            GraphResponse::Err(GraphErrorBody { error }) => {
                if error.code == Some(ERROR_CODE_TOKEN_EXPIRED) {
                    return Err(ApiError::SessionExpired);
                }
                Err(ApiError::provider(error.message, error.code))
            }
        }
    }

    /// Resolve the caller's own account identity.
    pub async fn me(&self, access_token: &str) -> Result<Identity, ApiError> {
        debug!("Resolving account identity");
        self.get_json(
            self.endpoints.graph("me"),
            &[("fields", "id,username"), ("access_token", access_token)],
        )
        .await
    }

    /// Fetch the profile fields for an account.
    pub async fn profile(&self, access_token: &str, account_id: &str) -> Result<Profile, ApiError> {
        debug!("Fetching profile for account {}", account_id);
        self.get_json(
            self.endpoints.graph(account_id),
            &[("fields", PROFILE_FIELDS), ("access_token", access_token)],
        )
        .await
    }

    /// Fetch account-level insights over the trailing 30-day window.
    pub async fn insights(
        &self,
        access_token: &str,
        account_id: &str,
    ) -> Result<Vec<MetricSeries>, ApiError> {
        debug!("Fetching insights for account {}", account_id);

        let until = Utc::now().timestamp().to_string();
        let since = (Utc::now() - chrono::Duration::days(INSIGHTS_WINDOW_DAYS))
            .timestamp()
            .to_string();

        let envelope: InsightsEnvelope = self
            .get_json(
                self.endpoints.graph(&format!("{}/insights", account_id)),
                &[
                    ("metric", INSIGHT_METRICS),
                    ("period", "day"),
                    ("since", &since),
                    ("until", &until),
                    ("access_token", access_token),
                ],
            )
            .await?;

        Ok(envelope.data)
    }
}
