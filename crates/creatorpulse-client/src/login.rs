//! Login initiation
//!
//! Builds the provider authorization URL the browser navigates to. No local
//! state is created here; the provider owns the interactive consent step
//! entirely.

use url::Url;

use creatorpulse_core::{ProviderEndpoints, LOGIN_SCOPES};

/// Build the authorization URL for the given scopes.
///
/// The redirect URI is URL-encoded into the query and must be byte-identical
/// to the provider app registration. Scopes are comma-joined, per the
/// provider's convention.
pub fn authorization_url(
    endpoints: &ProviderEndpoints,
    app_id: &str,
    redirect_uri: &str,
    scopes: &[&str],
) -> anyhow::Result<Url> {
    let mut url = Url::parse(&endpoints.authorize_url)?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", app_id);
        query.append_pair("redirect_uri", redirect_uri);
        query.append_pair("scope", &scopes.join(","));
        query.append_pair("response_type", "code");
    }

    Ok(url)
}

/// Authorization URL with the default dashboard scope set.
pub fn default_authorization_url(
    endpoints: &ProviderEndpoints,
    app_id: &str,
    redirect_uri: &str,
) -> anyhow::Result<Url> {
    authorization_url(endpoints, app_id, redirect_uri, LOGIN_SCOPES)
}
