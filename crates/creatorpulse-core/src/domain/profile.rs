//! Account identity and profile entities

use serde::{Deserialize, Serialize};

/// Caller's own identity from the self-lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

/// Account profile fields shown in the dashboard header.
///
/// Field names match the Graph API so the payload deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,

    #[serde(default)]
    pub followers_count: u64,

    #[serde(default)]
    pub follows_count: u64,

    #[serde(default)]
    pub media_count: u64,
}

impl Profile {
    /// Display name, falling back to the handle when none is set.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}
