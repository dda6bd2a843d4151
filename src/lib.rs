//! Redis Cache - A small caching helper on top of Redis
//!
//! Stores values under generated UUID keys, reads them back with optional
//! coercion, and records call counts and call history of `store` in the
//! store itself.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;

pub use backend::{KvStore, MemoryStore, RedisStore};
pub use cache::{Cache, CacheBuilder, Converter, Payload, STORE};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::{replay, replay_to};
