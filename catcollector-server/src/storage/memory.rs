//! In-memory object store for tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ObjectStore, StoreError};

/// Object store backed by a map. Lets tests assert on uploaded bytes
/// without a bucket anywhere.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().ok()?.get(key).cloned()
    }

    /// Keys of everything stored so far.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, _content_type: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.objects
            .lock()
            .map_err(|_| StoreError::Network("store mutex poisoned".into()))?
            .insert(key.to_owned(), bytes);

        Ok(())
    }

    fn object_url(&self, key: &str) -> String {
        format!("memory://photos/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trip() {
        let store = MemoryStore::new();
        store
            .put("abc123.png", "image/png", vec![1, 2, 3])
            .await
            .expect("put failed");

        assert_eq!(store.get("abc123.png"), Some(vec![1, 2, 3]));
        assert_eq!(store.keys(), vec!["abc123.png".to_string()]);
        assert_eq!(store.object_url("abc123.png"), "memory://photos/abc123.png");
    }
}
