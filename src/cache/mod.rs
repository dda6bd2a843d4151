//! Cache Module
//!
//! Provides the cache front end over a `KvStore`, its payload type and the
//! read-side converters.

mod payload;
mod store;


// Re-export public types
pub use payload::{decode_text, parse_integer, Converter, Payload};
pub use store::{Cache, CacheBuilder};

use crate::instrument::Operation;

// == Public Constants ==
/// The instrumented `store` operation.
pub const STORE: Operation = Operation::new("Cache.store");
