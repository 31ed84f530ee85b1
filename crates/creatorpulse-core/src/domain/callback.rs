//! OAuth callback detection
//!
//! The provider hands control back to the dashboard through query parameters
//! on the redirect URL. They are decoded exactly once into a typed outcome,
//! and the visible URL is then cleaned so a refresh cannot replay a stale
//! single-use code.

use url::Url;

/// Query parameters that belong to the OAuth redirect and must not survive
/// callback handling.
const OAUTH_PARAMS: &[&str] = &["code", "error", "error_reason", "error_description", "state"];

/// Result of inspecting a page URL for OAuth callback parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The provider reported an authorization error.
    Error {
        error: String,
        description: Option<String>,
    },

    /// The provider delivered an authorization code.
    Code(String),

    /// Not a callback URL; render from whatever session is already stored.
    None,
}

impl CallbackOutcome {
    /// Decode the callback outcome from a URL's query string.
    ///
    /// `error` takes precedence over `code`: a redirect carrying both must
    /// never trigger an exchange.
    pub fn from_url(url: &Url) -> Self {
        let mut code = None;
        let mut error = None;
        let mut description = None;

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "error" => error = Some(value.into_owned()),
                "error_description" => description = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            return Self::Error { error, description };
        }

        match code {
            Some(code) if !code.is_empty() => Self::Code(code),
            _ => Self::None,
        }
    }

    /// Human-readable message for the error case.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Error { error, description } => Some(match description {
                Some(desc) => format!("{}: {}", error, desc),
                None => error.clone(),
            }),
            _ => None,
        }
    }
}

/// Strip OAuth callback parameters from a URL, preserving everything else.
///
/// Decoding the cleaned URL yields [`CallbackOutcome::None`], which is what
/// makes callback handling idempotent across page refreshes.
pub fn strip_oauth_params(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !OAUTH_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut cleaned = url.clone();
    cleaned.set_query(None);
    if !kept.is_empty() {
        let mut pairs = cleaned.query_pairs_mut();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
    }
    cleaned
}
