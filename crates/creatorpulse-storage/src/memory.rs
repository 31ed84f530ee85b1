//! In-memory session store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use creatorpulse_core::{SessionStore, StoreResult};

/// In-memory key-value store. Nothing survives the process; useful for tests
/// and for embedding the client without persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.values.write().unwrap().remove(key);
        Ok(())
    }
}
