//! Storage capability traits
//!
//! These traits define the interface for client-local persistence without
//! specifying the implementation (file-backed, in-memory, etc.)

use async_trait::async_trait;

/// Result type for store operations
pub type StoreResult<T> = anyhow::Result<T>;

/// Storage key for the session token.
pub const KEY_ACCESS_TOKEN: &str = "instagram_access_token";

/// Storage key for the resolved user id.
pub const KEY_USER_ID: &str = "instagram_user_id";

/// Key-value session storage capability.
///
/// The dashboard persists exactly two keys: the session token and the
/// resolved user id. They are written by login/callback handling, removed by
/// logout and expiry invalidation, and never mutated concurrently.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a stored value by key
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Set a value (insert or update)
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> StoreResult<()>;
}
