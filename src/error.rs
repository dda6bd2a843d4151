//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::num::ParseIntError;
use std::string::FromUtf8Error;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store failed or could not be reached
    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    /// Operation against a key holding the wrong kind of value
    #[error("Wrong type for key: {0}")]
    WrongType(String),

    /// Payload is not valid UTF-8 text
    #[error("Invalid UTF-8 payload: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Payload is not a base-10 integer
    #[error("Invalid integer payload: {0}")]
    InvalidInteger(#[from] ParseIntError),

    /// Incrementing the counter under this key would overflow an i64
    #[error("Increment would overflow: {0}")]
    Overflow(String),

    /// A custom converter rejected the payload
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// Writing replay output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
