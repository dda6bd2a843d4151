//! Redis Cache demo
//!
//! Connects to Redis, stores a few values, reads them back with each
//! conversion and replays the recorded call history.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use redis_cache::{replay, Cache, Config, Converter, RedisStore, STORE};

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to Redis and build the cache (flushes the database)
/// 4. Store and read back a text, a binary and an integer value
/// 5. Replay the history of `Cache.store`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redis_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Configuration loaded: redis_url={}", config.redis_url);

    let store = RedisStore::connect(&config.redis_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.redis_url))?;
    let cache = Cache::new(store).await?;

    let text_key = cache.store("foo").await?;
    let bytes_key = cache.store(b"bar").await?;
    let int_key = cache.store(42i64).await?;

    println!("{:?}", cache.get_str(&text_key).await?);
    println!("{:?}", cache.get(&bytes_key, Converter::Raw).await?);
    println!("{:?}", cache.get_int(&int_key).await?);
    println!("{:?}", cache.get_int(STORE.name()).await?);

    replay(cache.backend(), &STORE).await?;

    info!("Done");
    Ok(())
}
