//! Redis Store Module
//!
//! `KvStore` over a multiplexed async Redis connection.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::info;

use crate::backend::KvStore;
use crate::error::Result;

// == Redis Store ==
/// Handle to a Redis database.
///
/// The multiplexed connection is cheap to clone; each command clones it so the
/// store can be shared behind `&self`.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
}

impl RedisStore {
    /// Connects to the Redis server at `url`.
    ///
    /// Fails immediately if the server is unreachable; there is no retry.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        info!("Connected to Redis at {}", url);
        Ok(Self { connection })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn flush_db(&self) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = redis::cmd("FLUSHDB").query_async(&mut con).await?;
        Ok(())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut con = self.connection.clone();
        let _: () = con.set(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut con = self.connection.clone();
        let value: Option<Vec<u8>> = con.get(key).await?;
        Ok(value)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut con = self.connection.clone();
        let value: i64 = con.incr(key, 1).await?;
        Ok(value)
    }

    async fn rpush(&self, key: &str, value: String) -> Result<usize> {
        let mut con = self.connection.clone();
        let len: usize = con.rpush(key, value).await?;
        Ok(len)
    }

    async fn lrange(&self, key: &str) -> Result<Vec<String>> {
        let mut con = self.connection.clone();
        let values: Vec<String> = con.lrange(key, 0, -1).await?;
        Ok(values)
    }
}
