//! In-Process Store Module
//!
//! A HashMap-backed `KvStore` with the same observable semantics as the
//! Redis commands it stands in for.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::KvStore;
use crate::error::{CacheError, Result};

/// A stored value: either a plain string value or a list.
#[derive(Debug, Clone)]
enum Entry {
    Value(Vec<u8>),
    List(Vec<String>),
}

// == Memory Store ==
/// In-process key-value store.
///
/// Cloning yields another handle to the same data, like opening a second
/// connection to the same server.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently held.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn flush_db(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        debug!("Flushing {} keys", entries.len());
        entries.clear();
        Ok(())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry::Value(value));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.entries.read().await.get(key) {
            Some(Entry::Value(value)) => Ok(Some(value.clone())),
            Some(Entry::List(_)) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(None),
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.entries.write().await;

        let current = match entries.get(key) {
            Some(Entry::Value(value)) => String::from_utf8(value.clone())?.parse::<i64>()?,
            Some(Entry::List(_)) => return Err(CacheError::WrongType(key.to_string())),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::Overflow(key.to_string()))?;
        entries.insert(key.to_string(), Entry::Value(next.to_string().into_bytes()));
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: String) -> Result<usize> {
        let mut entries = self.entries.write().await;

        match entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()))
        {
            Entry::List(list) => {
                list.push(value);
                Ok(list.len())
            }
            Entry::Value(_) => Err(CacheError::WrongType(key.to_string())),
        }
    }

    async fn lrange(&self, key: &str) -> Result<Vec<String>> {
        match self.entries.read().await.get(key) {
            Some(Entry::List(list)) => Ok(list.clone()),
            Some(Entry::Value(_)) => Err(CacheError::WrongType(key.to_string())),
            None => Ok(Vec::new()),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", b"value1".to_vec()).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();

        store.set("key1", b"value1".to_vec()).await.unwrap();
        store.set("key1", b"value2".to_vec()).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value2".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_incr_starts_at_one() {
        let store = MemoryStore::new();

        assert_eq!(store.incr("counter").await.unwrap(), 1);
        assert_eq!(store.incr("counter").await.unwrap(), 2);
        assert_eq!(store.get("counter").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_incr_non_integer() {
        let store = MemoryStore::new();
        store.set("key1", b"abc".to_vec()).await.unwrap();

        let result = store.incr("key1").await;
        assert!(matches!(result, Err(CacheError::InvalidInteger(_))));
    }

    #[tokio::test]
    async fn test_incr_overflow() {
        let store = MemoryStore::new();
        store.set("counter", i64::MAX.to_string().into_bytes()).await.unwrap();

        let result = store.incr("counter").await;
        assert!(matches!(result, Err(CacheError::Overflow(_))));

        // The stored value is left untouched.
        assert_eq!(
            store.get("counter").await.unwrap(),
            Some(i64::MAX.to_string().into_bytes())
        );
    }

    #[tokio::test]
    async fn test_rpush_and_lrange() {
        let store = MemoryStore::new();

        assert_eq!(store.rpush("list", "a".to_string()).await.unwrap(), 1);
        assert_eq!(store.rpush("list", "b".to_string()).await.unwrap(), 2);

        assert_eq!(store.lrange("list").await.unwrap(), vec!["a", "b"]);
        assert!(store.lrange("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_type() {
        let store = MemoryStore::new();
        store.set("value", b"1".to_vec()).await.unwrap();
        store.rpush("list", "a".to_string()).await.unwrap();

        assert!(matches!(
            store.rpush("value", "a".to_string()).await,
            Err(CacheError::WrongType(_))
        ));
        assert!(matches!(store.get("list").await, Err(CacheError::WrongType(_))));
        assert!(matches!(store.incr("list").await, Err(CacheError::WrongType(_))));
        assert!(matches!(store.lrange("value").await, Err(CacheError::WrongType(_))));
    }

    #[tokio::test]
    async fn test_flush_db() {
        let store = MemoryStore::new();
        store.set("key1", b"value1".to_vec()).await.unwrap();
        store.rpush("list", "a".to_string()).await.unwrap();

        store.flush_db().await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("key1", b"value1".to_vec()).await.unwrap();

        assert_eq!(other.get("key1").await.unwrap(), Some(b"value1".to_vec()));
    }
}
