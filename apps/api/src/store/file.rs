use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use portfolio_shared::{ContactMessage, InsertContactMessage};
use tokio::sync::Mutex;
use tracing::debug;

use super::{MessageStore, StoreError};

/// Stores messages as a JSON array on disk. The whole file is rewritten on
/// each create, through a temp file + rename so readers never see a partial
/// write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    messages: Mutex<Vec<ContactMessage>>,
}

impl JsonFileStore {
    /// Opens the store, loading existing messages. A missing file is an
    /// empty store; it is created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let messages = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Loaded {} messages from {}", messages.len(), path.display());
        Ok(Self {
            path,
            messages: Mutex::new(messages),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, messages: &[ContactMessage]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(messages)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl MessageStore for JsonFileStore {
    async fn create(&self, input: InsertContactMessage) -> Result<ContactMessage, StoreError> {
        let mut messages = self.messages.lock().await;
        let last_id = messages.iter().map(|m| m.id).max().unwrap_or(0);
        let id = last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(last_id))?;
        let message = ContactMessage::from_insert(id, input, Utc::now());

        messages.push(message.clone());
        if let Err(e) = self.persist(&messages).await {
            messages.pop();
            return Err(e);
        }
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, StoreError> {
        Ok(self.messages.lock().await.clone())
    }
}
