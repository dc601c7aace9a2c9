//! Contact message persistence.
//!
//! Handlers only see `Arc<dyn MessageStore>`; the backend is picked at
//! startup from `CONTACT_STORE`.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use portfolio_shared::{ContactMessage, InsertContactMessage};
use thiserror::Error;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("No message ids left after {0}")]
    IdsExhausted(u64),
}

/// Append-only store. Ids are unique and strictly increasing per store.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn create(&self, input: InsertContactMessage) -> Result<ContactMessage, StoreError>;

    /// All stored messages in creation order.
    async fn list(&self) -> Result<Vec<ContactMessage>, StoreError>;
}
