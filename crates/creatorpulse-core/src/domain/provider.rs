//! Identity-provider endpoints and constants

use serde::{Deserialize, Serialize};

/// Scopes requested at login. Both are needed to read the profile and the
/// account-level insights.
pub const LOGIN_SCOPES: &[&str] = &[
    "instagram_business_basic",
    "instagram_business_manage_insights",
];

/// Provider error code meaning the access token is invalid or expired.
pub const ERROR_CODE_TOKEN_EXPIRED: i64 = 190;

/// Identity-provider endpoint set.
///
/// Defaults target the Instagram Graph API; tests point these at a mock
/// server instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    /// Interactive consent page the browser is sent to
    pub authorize_url: String,

    /// Secret-bearing token exchange endpoint
    pub token_url: String,

    /// Data API base URL
    pub graph_url: String,

    /// Data API version segment
    pub api_version: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            authorize_url: "https://www.instagram.com/oauth/authorize".to_string(),
            token_url: "https://api.instagram.com/oauth/access_token".to_string(),
            graph_url: "https://graph.instagram.com".to_string(),
            api_version: "v22.0".to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Versioned data API URL for a path, e.g. `graph("me")`.
    pub fn graph(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.graph_url,
            self.api_version,
            path.trim_start_matches('/')
        )
    }

    /// Unversioned data API URL, used by the token-upgrade endpoint.
    pub fn graph_root(&self, path: &str) -> String {
        format!("{}/{}", self.graph_url, path.trim_start_matches('/'))
    }
}
