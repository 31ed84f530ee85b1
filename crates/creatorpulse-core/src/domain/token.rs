//! Token grant types
//!
//! What the gateway hands back to the dashboard after talking to the
//! provider. The client secret never appears in any of these shapes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access token grant returned after a successful code exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Bearer credential for Graph API calls
    pub access_token: String,

    /// Provider-side user identifier, when the provider includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Long-lived token grant from the provider's token-upgrade endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongLivedGrant {
    pub access_token: String,
    pub token_type: String,
    /// Remaining lifetime in seconds
    pub expires_in: i64,
}

/// Provider user identifier.
///
/// The provider serializes it as a JSON number on some endpoints and as a
/// string on others; both decode to the same normalized string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(i64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) => UserId(text),
            Repr::Number(number) => UserId(number.to_string()),
        })
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
