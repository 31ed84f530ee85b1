//! JSON-file-backed session store
//!
//! A single small document holds the session keys. Reads tolerate a missing
//! file (empty session); writes create the parent directory on demand.

use anyhow::Context as _;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use creatorpulse_core::{SessionStore, StoreResult};

/// Session store persisted as a JSON object on disk.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform-default location
    /// (e.g. `~/.local/share/creatorpulse/session.json` on Linux).
    pub fn default_path() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("creatorpulse").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> StoreResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("corrupt session file at {}", self.path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e).with_context(|| {
                format!("failed to read session file at {}", self.path.display())
            }),
        }
    }

    async fn write_all(&self, values: &HashMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let raw = serde_json::to_string_pretty(values)?;
        tokio::fs::write(&self.path, raw)
            .await
            .with_context(|| format!("failed to write session file at {}", self.path.display()))?;

        debug!("Session file updated: {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_all().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut values = self.read_all().await?;
        if values.remove(key).is_some() {
            self.write_all(&values).await?;
        }
        Ok(())
    }
}
