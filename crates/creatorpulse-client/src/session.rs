//! Dashboard session
//!
//! Typed access to the two persisted keys over an injected
//! [`SessionStore`]. The store is the only persistent shared resource on
//! the client side; it is written by login/callback handling and cleared by
//! logout or expiry invalidation.

use std::sync::Arc;
use tracing::debug;

use creatorpulse_core::{SessionStore, StoreResult, UserId, KEY_ACCESS_TOKEN, KEY_USER_ID};

/// The dashboard's view of the persisted login state.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn access_token(&self) -> StoreResult<Option<String>> {
        self.store.get(KEY_ACCESS_TOKEN).await
    }

    pub async fn user_id(&self) -> StoreResult<Option<String>> {
        self.store.get(KEY_USER_ID).await
    }

    pub async fn is_logged_in(&self) -> bool {
        matches!(self.access_token().await, Ok(Some(_)))
    }

    /// Persist a fresh login.
    pub async fn store_login(
        &self,
        access_token: &str,
        user_id: Option<&UserId>,
    ) -> StoreResult<()> {
        self.store.set(KEY_ACCESS_TOKEN, access_token).await?;
        if let Some(user_id) = user_id {
            self.store.set(KEY_USER_ID, &user_id.0).await?;
        }
        debug!("Session stored");
        Ok(())
    }

    /// Remember the account id resolved during the fetch sequence.
    pub async fn store_user_id(&self, user_id: &str) -> StoreResult<()> {
        self.store.set(KEY_USER_ID, user_id).await
    }

    /// Drop the stored token and user id (logout or expiry invalidation).
    pub async fn clear(&self) -> StoreResult<()> {
        self.store.remove(KEY_ACCESS_TOKEN).await?;
        self.store.remove(KEY_USER_ID).await?;
        debug!("Session cleared");
        Ok(())
    }
}
