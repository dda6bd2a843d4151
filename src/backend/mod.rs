//! Store Backend Module
//!
//! The seam between the cache and the external key-value store. Every
//! operation that touches the store goes through a `KvStore` handle passed in
//! explicitly by the caller.

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

use async_trait::async_trait;

use crate::error::Result;

// == Key-Value Store ==
/// The subset of Redis commands the cache relies on.
///
/// Each command is atomic on its own; nothing here groups commands into a
/// transaction.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Removes every key in the active database (`FLUSHDB`).
    async fn flush_db(&self) -> Result<()>;

    /// Writes a raw value under `key`, replacing any previous value (`SET`).
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Reads the raw value under `key`, `None` when absent (`GET`).
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Increments the integer under `key` by one, returning the new value (`INCR`).
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Appends to the list under `key`, returning its new length (`RPUSH`).
    async fn rpush(&self, key: &str, value: String) -> Result<usize>;

    /// Returns the whole list under `key`, empty when absent (`LRANGE key 0 -1`).
    async fn lrange(&self, key: &str) -> Result<Vec<String>>;
}
