//! Cache Module
//!
//! Stores values under freshly generated keys and reads them back with an
//! optional conversion. `store` runs inside the attached instrumentation.

use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::KvStore;
use crate::cache::{decode_text, parse_integer, Converter, Payload, STORE};
use crate::error::Result;
use crate::instrument::{format_call_args, CallHistory, CountCalls, Instruments, Middleware};

// == Cache Builder ==
/// Configures the instrumentation of a `Cache` before connecting it.
#[derive(Debug)]
pub struct CacheBuilder<S> {
    store: S,
    instruments: Instruments,
}

impl<S: KvStore> CacheBuilder<S> {
    /// Starts a builder with no instrumentation attached.
    pub fn new(store: S) -> Self {
        Self {
            store,
            instruments: Instruments::new(),
        }
    }

    /// Counts invocations of `store`.
    pub fn count_calls(self) -> Self {
        self.layer(CountCalls)
    }

    /// Records the inputs and outputs of each `store` call.
    pub fn call_history(self) -> Self {
        self.layer(CallHistory)
    }

    /// Attaches a middleware inside the ones already attached.
    pub fn layer(mut self, layer: impl Middleware + 'static) -> Self {
        self.instruments = self.instruments.with(layer);
        self
    }

    /// Builds the cache, flushing every key in the store's active database.
    pub async fn build(self) -> Result<Cache<S>> {
        self.store.flush_db().await?;
        info!("Store flushed, instruments: {:?}", self.instruments);

        Ok(Cache {
            store: self.store,
            instruments: self.instruments,
        })
    }
}

// == Cache ==
/// Cache over an external key-value store.
#[derive(Debug)]
pub struct Cache<S> {
    /// Handle to the backing store
    store: S,
    /// Middleware wrapped around `store`
    instruments: Instruments,
}

impl<S: KvStore> Cache<S> {
    // == Constructor ==
    /// Creates a cache with call counting and call history attached.
    ///
    /// Wipes the store's active database.
    pub async fn new(store: S) -> Result<Self> {
        Self::builder(store).count_calls().call_history().build().await
    }

    /// Starts a builder for a cache with custom instrumentation.
    pub fn builder(store: S) -> CacheBuilder<S> {
        CacheBuilder::new(store)
    }

    /// Returns the backing store handle.
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Returns the attached instrumentation.
    pub fn instruments(&self) -> &Instruments {
        &self.instruments
    }

    // == Store ==
    /// Stores `value` under a new random key and returns the key.
    pub async fn store(&self, value: impl Into<Payload>) -> Result<String> {
        let value = value.into();
        let args = format_call_args(&[&value]);

        self.instruments.before(&self.store, &STORE, &args).await?;

        let key = Uuid::new_v4().to_string();
        self.store.set(&key, value.into_bytes()).await?;
        debug!("Stored {} under {}", args, key);

        self.instruments.after(&self.store, &STORE, &key).await?;
        Ok(key)
    }

    // == Get ==
    /// Reads the value under `key` and applies `converter`.
    ///
    /// A missing key is `Ok(None)`; conversion errors are returned as is.
    pub async fn get(&self, key: &str, converter: Converter) -> Result<Option<Payload>> {
        self.get_with(key, |raw| converter.apply(raw)).await
    }

    /// Reads the value under `key` and converts it with `f`.
    pub async fn get_with<T, F>(&self, key: &str, f: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T>,
    {
        match self.store.get(key).await? {
            Some(raw) => f(raw).map(Some),
            None => {
                debug!("Key not found: {}", key);
                Ok(None)
            }
        }
    }

    /// Reads the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_text).await
    }

    /// Reads the value under `key` as a base-10 integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, parse_integer).await
    }
}
