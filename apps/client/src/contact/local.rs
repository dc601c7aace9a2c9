use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use portfolio_shared::{ContactMessage, InsertContactMessage, CONTACT_STORAGE_KEY};
use tracing::{error, info};

use super::ContactApi;
use crate::error::ClientError;

const SUBMIT_FAILED: &str = "Failed to submit form. Please try again later.";

/// String key/value storage with the semantics of browser local storage.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        let items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ClientError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(format!("read {key}: {e}"))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ClientError> {
        std::fs::create_dir_all(&self.dir)
            .and_then(|()| std::fs::write(self.path_for(key), value))
            .map_err(|e| ClientError::Storage(format!("write {key}: {e}")))
    }
}

/// Contact submission for the static build: appends to a JSON array under
/// [`CONTACT_STORAGE_KEY`].
///
/// Ids are epoch milliseconds, bumped past the newest stored id so two
/// submissions in the same millisecond still get distinct, increasing ids.
/// Storage calls are synchronous; `submit` runs them on the blocking pool.
pub struct LocalContactApi {
    storage: Arc<dyn KeyValueStorage>,
    write_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for LocalContactApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalContactApi").finish_non_exhaustive()
    }
}

impl LocalContactApi {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        LocalContactApi {
            storage,
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// All stored messages in submission order. Blocks on storage.
    pub fn messages(&self) -> Result<Vec<ContactMessage>, ClientError> {
        read_messages(self.storage.as_ref())
    }
}

fn read_messages(storage: &dyn KeyValueStorage) -> Result<Vec<ContactMessage>, ClientError> {
    match storage.get_item(CONTACT_STORAGE_KEY)? {
        Some(raw) => serde_json::from_str(&raw)
            .map_err(|e| ClientError::Storage(format!("corrupt {CONTACT_STORAGE_KEY}: {e}"))),
        None => Ok(Vec::new()),
    }
}

fn append(
    storage: &dyn KeyValueStorage,
    input: InsertContactMessage,
) -> Result<ContactMessage, ClientError> {
    let mut messages = read_messages(storage)?;
    let now = Utc::now();
    let last_id = messages.iter().map(|m| m.id).max().unwrap_or(0);
    let next_id = last_id
        .checked_add(1)
        .ok_or_else(|| ClientError::Storage(format!("no ids left after {last_id}")))?;
    let id = u64::try_from(now.timestamp_millis())
        .unwrap_or(0)
        .max(next_id);

    let message = ContactMessage::from_insert(id, input, now);
    messages.push(message.clone());

    let json = serde_json::to_string(&messages)
        .map_err(|e| ClientError::Storage(format!("encode messages: {e}")))?;
    storage.set_item(CONTACT_STORAGE_KEY, &json)?;
    Ok(message)
}

#[async_trait]
impl ContactApi for LocalContactApi {
    async fn submit(&self, input: &InsertContactMessage) -> Result<ContactMessage, ClientError> {
        let _guard = self.write_lock.lock().await;
        let storage = Arc::clone(&self.storage);
        let input = input.clone();
        let task = tokio::task::spawn_blocking(move || append(storage.as_ref(), input));
        let result = match task.await {
            Ok(result) => result,
            Err(e) => Err(ClientError::Storage(format!("storage task failed: {e}"))),
        };
        match result {
            Ok(message) => {
                info!("Saved contact message {} locally", message.id);
                Ok(message)
            }
            Err(e) => {
                error!("Error saving contact message: {e}");
                Err(ClientError::Storage(SUBMIT_FAILED.to_string()))
            }
        }
    }
}
