use async_trait::async_trait;
use chrono::Utc;
use portfolio_shared::{ContactMessage, InsertContactMessage};
use tokio::sync::Mutex;

use super::{MessageStore, StoreError};

/// Process-lifetime store. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    messages: Vec<ContactMessage>,
    next_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                messages: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn create(&self, input: InsertContactMessage) -> Result<ContactMessage, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted(id))?;

        let message = ContactMessage::from_insert(id, input, Utc::now());
        inner.messages.push(message.clone());
        Ok(message)
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, StoreError> {
        Ok(self.inner.lock().await.messages.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn input(n: usize) -> InsertContactMessage {
        InsertContactMessage::new(
            format!("Sender {n}"),
            format!("sender{n}@example.com"),
            "A message long enough to pass",
        )
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let store = InMemoryStore::new();
        let first = store.create(input(1)).await.unwrap();
        let second = store.create(input(2)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(second.created_at >= first.created_at);
    }

    #[tokio::test]
    async fn test_created_at_not_before_submission() {
        let store = InMemoryStore::new();
        let before = Utc::now();
        let stored = store.create(input(1)).await.unwrap();
        assert!(stored.created_at >= before);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..20)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.create(input(n)).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(store.list().await.unwrap().len(), 20);
    }
}
